use std::io;
use std::process::exit;

use sms_resource_sns::handlers::get::handle_in;
use sms_resource_sns::logging::init_logging;

// Concourse passes the destination directory as the first argument; nothing
// is written there.
fn main() {
    init_logging();
    let status = handle_in(io::stdin().lock(), io::stdout().lock(), io::stderr().lock());
    exit(status.code());
}
