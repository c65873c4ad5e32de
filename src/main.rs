//! TimeDesk main entrypoint.

use timedesk::run;
use timedesk::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
