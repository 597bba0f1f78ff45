use std::io;
use std::process::exit;

use sms_resource_sns::adapters::sns::SnsMessagingClient;
use sms_resource_sns::handlers::put::handle_out;
use sms_resource_sns::logging::init_logging;

#[tokio::main]
async fn main() {
    init_logging();

    let status = handle_out(
        io::stdin().lock(),
        io::stdout().lock(),
        io::stderr().lock(),
        |source| {
            tokio::task::block_in_place(|| {
                tokio::runtime::Handle::current().block_on(SnsMessagingClient::connect(source))
            })
        },
    );
    exit(status.code());
}
