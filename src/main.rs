//! rInventory main entrypoint.

use rinventory::run;
use rinventory::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
