//! Debug events of the cleaning stages carry row ids, never supplier text.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use contract_model::{CleaningOptions, ContractTable, DateValue, ResolutionPolicy};
use contract_transform::clean_table;
use tracing::Level;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_debug(run: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, run);
    let bytes = captured.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn overlap_events_do_not_name_the_supplier() {
    let mut table = ContractTable::default();
    for (reference, start, end) in [
        ("-2607899", "10-01-2014", "31-12-2019"),
        ("-2607904", "01-02-2018", "08-02-2020"),
        ("-2607905", "21-03-2021", "20-03-2021"),
    ] {
        table.push(
            "Northwind Traders",
            2496186,
            reference,
            DateValue::Text(start.to_string()),
            DateValue::Text(end.to_string()),
            vec![],
        );
    }
    let options = CleaningOptions::default().with_policy(ResolutionPolicy::ExtendPerGroup);

    let output = capture_debug(|| {
        clean_table(&mut table, &options);
    });

    assert!(output.contains("overlapping interval"));
    assert!(output.contains("swapping reversed interval"));
    assert!(!output.contains("Northwind"));
    assert!(!output.contains("2607904"));
}
