use crate::train::history::History;

/// Prints the final-epoch metrics of a run as a small table.
pub fn print_summary(name: &str, history: &History) {
    println!("\n{} summary ({} epochs):", name, history.len());
    println!("+------------+----------+----------+");
    println!("|            |    Train |    Valid |");
    println!("+------------+----------+----------+");
    if let Some((lt, lv, at, av)) = history.last() {
        println!("| Loss       | {:>8.4} | {:>8.4} |", lt, lv);
        println!("| Accuracy   | {:>8.4} | {:>8.4} |", at, av);
    }
    println!("+------------+----------+----------+");
}
