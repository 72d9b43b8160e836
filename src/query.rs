//! Filtering of transaction collections.

use std::collections::HashSet;

use time::Date;

use crate::{
    date::parse_transaction_date,
    models::{Category, CategoryId, Transaction, TransactionType},
};

/// An inclusive calendar-date range.
///
/// Bounds are compared at day granularity with no time zone attached; an
/// absent bound leaves that side of the range open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    /// Keep dates on or after this day.
    pub from: Option<Date>,
    /// Keep dates on or before this day.
    pub to: Option<Date>,
}

impl DateRange {
    /// Whether `date` falls within this range, bounds inclusive.
    pub fn contains(&self, date: Date) -> bool {
        let after_from = self.from.map_or(true, |from| date >= from);
        let before_to = self.to.map_or(true, |to| date <= to);

        after_from && before_to
    }
}

/// Defines which transactions to keep when filtering a collection.
///
/// All fields are independently optional; the [Default] query selects
/// everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    /// Case-insensitive substring to look for in the note or the category
    /// label. Blank strings are treated as absent.
    pub text: Option<String>,
    /// Keep transactions belonging to these categories. Empty means no
    /// category filter.
    pub category_ids: HashSet<CategoryId>,
    /// Keep transactions dated within this range. Transactions whose date
    /// cannot be parsed are kept.
    pub date_range: Option<DateRange>,
    /// Keep transactions of this type only.
    pub kind: Option<TransactionType>,
}

/// Filter `transactions` by `query`, preserving the input order.
///
/// Filters apply conjunctively and each is skipped entirely when its query
/// field is absent or empty. `categories` is the category collection
/// current at filter time; it translates [TransactionQuery::category_ids]
/// into category names, because transactions reference categories by name.
/// Renaming a category therefore changes which transactions its id
/// matches.
pub fn filter_transactions(
    mut transactions: Vec<Transaction>,
    categories: &[Category],
    query: &TransactionQuery,
) -> Vec<Transaction> {
    if let Some(term) = query
        .text
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
    {
        let term = term.to_lowercase();
        transactions.retain(|transaction| {
            transaction.note.trim().to_lowercase().contains(&term)
                || transaction
                    .category
                    .as_ref()
                    .trim()
                    .to_lowercase()
                    .contains(&term)
        });
    }

    if let Some(kind) = query.kind {
        transactions.retain(|transaction| transaction.kind == kind);
    }

    if !query.category_ids.is_empty() {
        let names: HashSet<&str> = categories
            .iter()
            .filter(|category| query.category_ids.contains(&category.id))
            .map(|category| category.name.as_ref())
            .collect();
        transactions.retain(|transaction| names.contains(transaction.category.as_ref()));
    }

    if let Some(range) = query.date_range {
        transactions.retain(
            |transaction| match parse_transaction_date(&transaction.date) {
                Some(date) => range.contains(date),
                // Unparseable dates are kept, never silently dropped.
                None => true,
            },
        );
    }

    transactions
}

#[cfg(test)]
mod date_range_tests {
    use time::macros::date;

    use super::DateRange;

    #[test]
    fn bounds_are_inclusive() {
        let range = DateRange {
            from: Some(date!(2025 - 01 - 01)),
            to: Some(date!(2025 - 01 - 31)),
        };

        assert!(range.contains(date!(2025 - 01 - 01)));
        assert!(range.contains(date!(2025 - 01 - 31)));
        assert!(!range.contains(date!(2024 - 12 - 31)));
        assert!(!range.contains(date!(2025 - 02 - 01)));
    }

    #[test]
    fn absent_bounds_leave_the_range_open() {
        let from_only = DateRange {
            from: Some(date!(2025 - 01 - 01)),
            to: None,
        };
        let to_only = DateRange {
            from: None,
            to: Some(date!(2025 - 01 - 31)),
        };

        assert!(from_only.contains(date!(2099 - 12 - 31)));
        assert!(to_only.contains(date!(1999 - 01 - 01)));
        assert!(DateRange::default().contains(date!(2025 - 06 - 15)));
    }
}

#[cfg(test)]
mod filter_transactions_tests {
    use std::collections::HashSet;

    use time::macros::date;

    use crate::{
        models::{Category, CategoryName, Transaction, TransactionType},
        query::{DateRange, TransactionQuery, filter_transactions},
    };

    fn transaction(
        id: &str,
        category: &str,
        kind: TransactionType,
        date: &str,
        note: &str,
    ) -> Transaction {
        let amount = match kind {
            TransactionType::Expense => -10.0,
            TransactionType::Income => 10.0,
        };

        Transaction {
            id: id.to_string(),
            amount,
            category: CategoryName::new_unchecked(category),
            kind,
            date: date.to_string(),
            note: note.to_string(),
            photo_ref: None,
        }
    }

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: CategoryName::new_unchecked(name),
            color: None,
            icon: None,
        }
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            transaction(
                "1",
                "Food",
                TransactionType::Expense,
                "05 Jan 2025",
                "Grocery FOOD run",
            ),
            transaction(
                "2",
                "Transport",
                TransactionType::Expense,
                "10 Jan 2025",
                "Bus fare",
            ),
            transaction(
                "3",
                "Salary",
                TransactionType::Income,
                "15 Jan 2025",
                "January pay",
            ),
        ]
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let transactions = sample_transactions();

        let got = filter_transactions(transactions.clone(), &[], &TransactionQuery::default());

        assert_eq!(got, transactions);
    }

    #[test]
    fn text_filter_is_case_insensitive_over_note_and_category() {
        let query = TransactionQuery {
            text: Some("food".to_string()),
            ..TransactionQuery::default()
        };

        let got = filter_transactions(sample_transactions(), &[], &query);

        // Matches "Food" as a category label and "Grocery FOOD run" as a
        // note; both belong to the same transaction here.
        assert_eq!(got.len(), 1, "got {} transactions, want 1", got.len());
        assert_eq!(got[0].id, "1");
    }

    #[test]
    fn blank_text_filter_is_treated_as_absent() {
        let query = TransactionQuery {
            text: Some("   ".to_string()),
            ..TransactionQuery::default()
        };

        let got = filter_transactions(sample_transactions(), &[], &query);

        assert_eq!(got.len(), 3);
    }

    #[test]
    fn type_filter_keeps_exact_matches_only() {
        let query = TransactionQuery {
            kind: Some(TransactionType::Income),
            ..TransactionQuery::default()
        };

        let got = filter_transactions(sample_transactions(), &[], &query);

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, "3");
    }

    #[test]
    fn category_filter_resolves_ids_through_current_names() {
        let categories = [category("10", "Food"), category("11", "Transport")];
        let query = TransactionQuery {
            category_ids: HashSet::from(["10".to_string()]),
            ..TransactionQuery::default()
        };

        let got = filter_transactions(sample_transactions(), &categories, &query);

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].category.as_ref(), "Food");
    }

    #[test]
    fn renaming_a_category_changes_what_its_id_matches() {
        // The id still resolves, but to the new name, which no stored
        // transaction carries.
        let categories = [category("10", "Groceries")];
        let query = TransactionQuery {
            category_ids: HashSet::from(["10".to_string()]),
            ..TransactionQuery::default()
        };

        let got = filter_transactions(sample_transactions(), &categories, &query);

        assert!(got.is_empty());
    }

    #[test]
    fn date_range_filter_keeps_records_within_inclusive_bounds() {
        let query = TransactionQuery {
            date_range: Some(DateRange {
                from: Some(date!(2025 - 01 - 05)),
                to: Some(date!(2025 - 01 - 10)),
            }),
            ..TransactionQuery::default()
        };

        let got = filter_transactions(sample_transactions(), &[], &query);

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].id, "1");
        assert_eq!(got[1].id, "2");
    }

    #[test]
    fn unparseable_dates_are_retained_under_any_range() {
        let mut transactions = sample_transactions();
        transactions.push(transaction(
            "4",
            "Other",
            TransactionType::Expense,
            "sometime last week",
            "",
        ));

        let query = TransactionQuery {
            date_range: Some(DateRange {
                from: Some(date!(2025 - 01 - 14)),
                to: Some(date!(2025 - 01 - 31)),
            }),
            ..TransactionQuery::default()
        };

        let got = filter_transactions(transactions, &[], &query);

        let ids: Vec<&str> = got.iter().map(|transaction| transaction.id.as_str()).collect();
        assert_eq!(ids, ["3", "4"]);
    }

    #[test]
    fn filters_apply_conjunctively() {
        let query = TransactionQuery {
            text: Some("pay".to_string()),
            kind: Some(TransactionType::Expense),
            ..TransactionQuery::default()
        };

        let got = filter_transactions(sample_transactions(), &[], &query);

        // "January pay" matches the text filter but is an income.
        assert!(got.is_empty());
    }
}
