use http_log_parser::app;
use std::process::ExitCode;

fn main() -> ExitCode {
    app::main()
}
