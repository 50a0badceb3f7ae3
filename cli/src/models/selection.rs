use serde::{Deserialize, Serialize};

/// The aggregate pseudo-entry shown above the company checkboxes.
pub const SELECT_ALL: &str = "SELECT ALL";

/// Whether the aggregate entry is currently active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    NoAggregate,
    Aggregate,
}

/// Outcome of one selection event. `changed` tells the view whether the
/// widget selection must be rewritten with `selected`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionUpdate {
    pub state: SelectionState,
    pub selected: Vec<String>,
    pub changed: bool,
}

/// Apply one selection event against the fixed company list.
///
/// In `Aggregate`, deselecting any company drops the aggregate entry and
/// leaves the remaining picks alone. In `NoAggregate`, picking the
/// aggregate entry (or manually selecting every company) expands the
/// selection to the aggregate entry plus all companies.
pub fn apply_selection(
    state: SelectionState,
    selected: &[String],
    companies: &[String],
) -> SelectionUpdate {
    let all_selected = companies.iter().all(|c| selected.iter().any(|s| s == c));

    match state {
        SelectionState::Aggregate => {
            if all_selected {
                return SelectionUpdate {
                    state: SelectionState::Aggregate,
                    selected: selected.to_vec(),
                    changed: false,
                };
            }
            let had_aggregate = selected.iter().any(|s| s == SELECT_ALL);
            let remaining: Vec<String> = selected
                .iter()
                .filter(|s| s.as_str() != SELECT_ALL)
                .cloned()
                .collect();
            SelectionUpdate {
                state: SelectionState::NoAggregate,
                selected: remaining,
                changed: had_aggregate,
            }
        }
        SelectionState::NoAggregate => {
            let aggregate_picked = selected.iter().any(|s| s == SELECT_ALL);
            if aggregate_picked || all_selected {
                let mut expanded = Vec::with_capacity(companies.len() + 1);
                expanded.push(SELECT_ALL.to_string());
                expanded.extend(companies.iter().cloned());
                return SelectionUpdate {
                    state: SelectionState::Aggregate,
                    selected: expanded,
                    changed: true,
                };
            }
            SelectionUpdate {
                state: SelectionState::NoAggregate,
                selected: selected.to_vec(),
                changed: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn companies() -> Vec<String> {
        vec!["ACME".to_string(), "GLOBEX".to_string(), "INITECH".to_string()]
    }

    fn s(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_picking_aggregate_expands_to_all() {
        let update = apply_selection(
            SelectionState::NoAggregate,
            &s(&["ACME", SELECT_ALL]),
            &companies(),
        );
        assert_eq!(update.state, SelectionState::Aggregate);
        assert!(update.changed);
        assert_eq!(
            update.selected,
            s(&[SELECT_ALL, "ACME", "GLOBEX", "INITECH"])
        );
    }

    #[test]
    fn test_selecting_every_company_manually_activates_aggregate() {
        let update = apply_selection(
            SelectionState::NoAggregate,
            &s(&["ACME", "GLOBEX", "INITECH"]),
            &companies(),
        );
        assert_eq!(update.state, SelectionState::Aggregate);
        assert!(update.changed);
    }

    #[test]
    fn test_deselecting_a_company_drops_aggregate() {
        let update = apply_selection(
            SelectionState::Aggregate,
            &s(&[SELECT_ALL, "ACME", "GLOBEX"]),
            &companies(),
        );
        assert_eq!(update.state, SelectionState::NoAggregate);
        assert!(update.changed);
        assert_eq!(update.selected, s(&["ACME", "GLOBEX"]));
    }

    #[test]
    fn test_aggregate_without_marker_still_demotes() {
        // The widget can drop the marker on its own; the state still resets
        // but there is nothing to rewrite.
        let update = apply_selection(
            SelectionState::Aggregate,
            &s(&["ACME", "GLOBEX"]),
            &companies(),
        );
        assert_eq!(update.state, SelectionState::NoAggregate);
        assert!(!update.changed);
    }

    #[test]
    fn test_partial_selection_passes_through() {
        let update = apply_selection(
            SelectionState::NoAggregate,
            &s(&["GLOBEX"]),
            &companies(),
        );
        assert_eq!(update.state, SelectionState::NoAggregate);
        assert!(!update.changed);
        assert_eq!(update.selected, s(&["GLOBEX"]));
    }

    #[test]
    fn test_full_selection_stays_aggregate() {
        let update = apply_selection(
            SelectionState::Aggregate,
            &s(&[SELECT_ALL, "ACME", "GLOBEX", "INITECH"]),
            &companies(),
        );
        assert_eq!(update.state, SelectionState::Aggregate);
        assert!(!update.changed);
    }
}
