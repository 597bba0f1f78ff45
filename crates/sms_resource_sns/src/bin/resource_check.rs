use std::io;
use std::process::exit;

use sms_resource_sns::handlers::check::handle_check;
use sms_resource_sns::logging::init_logging;

fn main() {
    init_logging();
    let status = handle_check(io::stdout().lock(), io::stderr().lock());
    exit(status.code());
}
