//! Page state machine for the forecast form.
//!
//! The controller owns the UI state and the single chart slot. Yew callbacks
//! drive it through [`ForecastController::submit`], [`ForecastController::resolve`]
//! and [`ForecastController::sync_chart`]; it never touches the DOM itself.

use common::{ForecastHorizon, ForecastResponse};
use thiserror::Error;

use crate::api_client::ForecastError;
use crate::render::{render, ChartModel, TableModel};

/// Identifies one submission. Only the latest ticket may resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Idle,
    Submitting {
        ticket: RequestTicket,
        horizon: ForecastHorizon,
    },
    Success {
        response: ForecastResponse,
        horizon: ForecastHorizon,
        table: TableModel,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a forecast request is already in progress")]
pub struct SubmitRejected;

/// A drawn chart. Owned by exactly one [`ChartSlot`] and handed back to the
/// renderer to be destroyed.
#[derive(Debug, PartialEq, Eq)]
pub struct ChartHandle {
    target: String,
}

impl ChartHandle {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Id of the element the chart was drawn into
    pub fn target(&self) -> &str {
        &self.target
    }
}

pub trait ChartRenderer {
    fn draw(&mut self, model: &ChartModel) -> ChartHandle;
    fn release(&mut self, handle: ChartHandle);
}

#[derive(Debug)]
enum SlotContent {
    Empty,
    /// Rendered but waiting for its container to be in the DOM
    Pending(ChartModel),
    Live(ChartHandle),
}

/// Holds at most one chart, releasing the old one before anything replaces it.
#[derive(Debug)]
pub struct ChartSlot<R> {
    renderer: R,
    content: SlotContent,
}

impl<R: ChartRenderer> ChartSlot<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            content: SlotContent::Empty,
        }
    }

    pub fn release(&mut self) {
        match std::mem::replace(&mut self.content, SlotContent::Empty) {
            SlotContent::Live(handle) => {
                log::debug!("Releasing chart in #{}", handle.target());
                self.renderer.release(handle);
            }
            SlotContent::Pending(_) => log::trace!("Dropping undrawn chart"),
            SlotContent::Empty => {}
        }
    }

    pub fn queue(&mut self, model: ChartModel) {
        self.release();
        self.content = SlotContent::Pending(model);
    }

    /// Draws a queued model. Returns whether anything was drawn.
    pub fn flush(&mut self) -> bool {
        match std::mem::replace(&mut self.content, SlotContent::Empty) {
            SlotContent::Pending(model) => {
                let handle = self.renderer.draw(&model);
                log::debug!("Chart drawn in #{}", handle.target());
                self.content = SlotContent::Live(handle);
                true
            }
            other => {
                self.content = other;
                false
            }
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.content, SlotContent::Live(_))
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

pub struct ForecastController<R: ChartRenderer> {
    state: UiState,
    last_ticket: u64,
    chart: ChartSlot<R>,
}

impl<R: ChartRenderer> ForecastController<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            state: UiState::Idle,
            last_ticket: 0,
            chart: ChartSlot::new(renderer),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, UiState::Submitting { .. })
    }

    pub fn has_live_chart(&self) -> bool {
        self.chart.is_live()
    }

    pub fn renderer(&self) -> &R {
        self.chart.renderer()
    }

    /// Starts a submission, clearing previous results and errors.
    pub fn submit(&mut self, horizon: ForecastHorizon) -> Result<RequestTicket, SubmitRejected> {
        if self.is_busy() {
            log::warn!("Ignoring submission while a forecast request is in progress");
            return Err(SubmitRejected);
        }

        self.chart.release();
        self.last_ticket += 1;
        let ticket = RequestTicket(self.last_ticket);
        log::debug!("Submitting forecast request {:?} for {} months", ticket, horizon.months());
        self.state = UiState::Submitting { ticket, horizon };
        Ok(ticket)
    }

    /// Applies the outcome of the request identified by `ticket`.
    ///
    /// Returns false when the ticket is not the one currently in flight.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<ForecastResponse, ForecastError>,
    ) -> bool {
        let horizon = match &self.state {
            UiState::Submitting {
                ticket: current,
                horizon,
            } if *current == ticket => *horizon,
            _ => {
                log::debug!("Discarding stale result for {:?}", ticket);
                return false;
            }
        };

        match outcome {
            Ok(response) => {
                let (table, chart) = render(&response, horizon.months());
                log::info!("Forecast ready: {} rows", table.rows.len());
                self.chart.queue(chart);
                self.state = UiState::Success {
                    response,
                    horizon,
                    table,
                };
            }
            Err(err) => {
                log::error!("Forecast request failed: {}", err);
                self.chart.release();
                self.state = UiState::Error {
                    message: err.user_message(),
                };
            }
        }
        true
    }

    /// Draws the queued chart once its container exists.
    pub fn sync_chart(&mut self) -> bool {
        match self.state {
            UiState::Success { .. } => self.chart.flush(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::FALLBACK_ERROR_MESSAGE;
    use common::MonthRecord;
    use rust_decimal::Decimal;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Draw(usize),
        Release(String),
    }

    #[derive(Default)]
    struct RecordingRenderer {
        events: Vec<Event>,
        drawn: usize,
    }

    impl ChartRenderer for RecordingRenderer {
        fn draw(&mut self, model: &ChartModel) -> ChartHandle {
            self.drawn += 1;
            self.events.push(Event::Draw(model.series.len()));
            ChartHandle::new(format!("chart-{}", self.drawn))
        }

        fn release(&mut self, handle: ChartHandle) {
            self.events.push(Event::Release(handle.target().to_string()));
        }
    }

    fn controller() -> ForecastController<RecordingRenderer> {
        ForecastController::new(RecordingRenderer::default())
    }

    fn response(months: u32) -> ForecastResponse {
        ForecastResponse {
            categories: vec!["Rent".into()],
            forecast: (1..=months)
                .map(|m| MonthRecord::new(m, Decimal::from(100)).with_amount("Rent", Decimal::from(900)))
                .collect(),
        }
    }

    #[test]
    fn test_success_flow() {
        let mut controller = controller();
        assert_eq!(controller.state(), &UiState::Idle);

        let ticket = controller.submit(ForecastHorizon::Three).unwrap();
        assert!(controller.is_busy());

        assert!(controller.resolve(ticket, Ok(response(6))));
        match controller.state() {
            UiState::Success { table, horizon, .. } => {
                assert_eq!(*horizon, ForecastHorizon::Three);
                assert_eq!(table.rows.len(), 6);
                assert!(table.rows[2].is_historical());
                assert!(!table.rows[3].is_historical());
            }
            other => panic!("unexpected state {:?}", other),
        }

        // Nothing is drawn until the container has been committed.
        assert!(!controller.has_live_chart());
        assert!(controller.sync_chart());
        assert!(controller.has_live_chart());
        assert!(!controller.sync_chart());
        assert_eq!(controller.renderer().events, vec![Event::Draw(2)]);
    }

    #[test]
    fn test_second_submission_is_rejected_while_busy() {
        let mut controller = controller();
        let ticket = controller.submit(ForecastHorizon::Six).unwrap();

        assert_eq!(controller.submit(ForecastHorizon::Twelve), Err(SubmitRejected));
        assert_eq!(
            controller.state(),
            &UiState::Submitting {
                ticket,
                horizon: ForecastHorizon::Six
            }
        );
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut controller = controller();
        let first = controller.submit(ForecastHorizon::Three).unwrap();
        controller.resolve(first, Err(ForecastError::Transport("offline".into())));

        let second = controller.submit(ForecastHorizon::Three).unwrap();
        assert_ne!(first, second);
        assert!(!controller.resolve(first, Ok(response(6))));
        assert!(controller.is_busy());

        assert!(controller.resolve(second, Ok(response(6))));
        assert!(!controller.resolve(second, Ok(response(6))));
    }

    #[test]
    fn test_previous_chart_released_before_new_one() {
        let mut controller = controller();

        let ticket = controller.submit(ForecastHorizon::Three).unwrap();
        controller.resolve(ticket, Ok(response(6)));
        controller.sync_chart();

        let ticket = controller.submit(ForecastHorizon::Three).unwrap();
        assert!(!controller.has_live_chart());
        controller.resolve(ticket, Ok(response(6)));
        controller.sync_chart();

        assert_eq!(
            controller.renderer().events,
            vec![
                Event::Draw(2),
                Event::Release("chart-1".into()),
                Event::Draw(2)
            ]
        );
        assert!(controller.has_live_chart());
    }

    #[test]
    fn test_server_error_message_reaches_state() {
        let mut controller = controller();
        let ticket = controller.submit(ForecastHorizon::Three).unwrap();

        controller.resolve(
            ticket,
            Err(ForecastError::Request {
                status: 422,
                message: Some("at least 3 months required".into()),
            }),
        );

        assert_eq!(
            controller.state(),
            &UiState::Error {
                message: "at least 3 months required".into()
            }
        );
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_undecodable_response_shows_fallback_and_clears_chart() {
        let mut controller = controller();
        let ticket = controller.submit(ForecastHorizon::Three).unwrap();
        controller.resolve(ticket, Ok(response(6)));
        controller.sync_chart();

        // Force a failure while the previous chart is still live.
        controller.state = UiState::Submitting {
            ticket: RequestTicket(99),
            horizon: ForecastHorizon::Three,
        };
        controller.resolve(
            RequestTicket(99),
            Err(ForecastError::Transport("expected value at line 1".into())),
        );

        assert_eq!(
            controller.state(),
            &UiState::Error {
                message: FALLBACK_ERROR_MESSAGE.into()
            }
        );
        assert!(!controller.has_live_chart());
        assert!(!controller.sync_chart());
        assert_eq!(
            controller.renderer().events.last(),
            Some(&Event::Release("chart-1".into()))
        );
    }

    #[test]
    fn test_resubmit_after_error_clears_message() {
        let mut controller = controller();
        let ticket = controller.submit(ForecastHorizon::Three).unwrap();
        controller.resolve(ticket, Err(ForecastError::Form("Please choose a CSV file".into())));

        controller.submit(ForecastHorizon::Twelve).unwrap();
        assert!(matches!(controller.state(), UiState::Submitting { .. }));
    }
}
