#[tokio::main]
async fn main() {
    dish_registry::start_server().await;
}
