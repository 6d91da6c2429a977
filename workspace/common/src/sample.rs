/// File name offered when the user downloads the sample dataset.
pub const SAMPLE_CSV_FILE_NAME: &str = "sample_expenses.csv";

/// Reference dataset with three months of expenses across five categories.
pub const SAMPLE_CSV: &str = "month,category,amount
1,Rent,1200
1,Food,450
1,Utilities,150
1,Entertainment,200
1,Transport,100
2,Rent,1200
2,Food,475
2,Utilities,160
2,Entertainment,180
2,Transport,110
3,Rent,1200
3,Food,500
3,Utilities,155
3,Entertainment,220
3,Transport,105
";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_sample_has_expected_header_and_months() {
        let mut lines = SAMPLE_CSV.lines();
        assert_eq!(lines.next(), Some("month,category,amount"));

        let months: BTreeSet<&str> = lines
            .filter_map(|line| line.split(',').next())
            .collect();
        assert!(months.len() >= 3);
    }

    #[test]
    fn test_sample_spans_multiple_categories() {
        let categories: BTreeSet<&str> = SAMPLE_CSV
            .lines()
            .skip(1)
            .filter_map(|line| line.split(',').nth(1))
            .collect();
        assert_eq!(categories.len(), 5);
        assert!(categories.contains("Rent"));
        assert!(categories.contains("Transport"));
    }
}
