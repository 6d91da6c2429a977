use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    pub text: AttrValue,
}

/// Inline busy indicator shown while a request is in flight.
#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div role="status" class="flex items-center gap-3 py-4">
            <span class="loading loading-spinner loading-sm"></span>
            <p class="text-sm text-gray-500">{props.text.clone()}</p>
        </div>
    }
}
