//! Journal display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Journal;

#[derive(Tabled)]
struct JournalRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Journal")]
    name: String,
}

/// Format the available journals; the first one is the dialog's default
pub fn format_journal_list(journals: &[Journal]) -> String {
    if journals.is_empty() {
        return "No payment journals available.\n".to_string();
    }

    let rows = journals.iter().enumerate().map(|(index, journal)| JournalRow {
        id: journal.id.get(),
        name: if index == 0 {
            format!("{} (default)", journal.name)
        } else {
            journal.name.clone()
        },
    });
    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JournalId;

    #[test]
    fn test_first_journal_marked_default() {
        let journals = vec![
            Journal::new(JournalId::new(3), "Cash"),
            Journal::new(JournalId::new(7), "Bank"),
        ];
        let output = format_journal_list(&journals);
        assert!(output.contains("Cash (default)"));
        assert!(output.contains("Bank"));
        assert!(!output.contains("Bank (default)"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_journal_list(&[]), "No payment journals available.\n");
    }
}
