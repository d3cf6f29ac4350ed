//! slideway binary entry point.

use slideway::{cli, ui::output};

fn main() {
    if let Err(e) = cli::run() {
        output::error(format!("{:#}", e));
        std::process::exit(1);
    }
}
