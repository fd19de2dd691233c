use anyhow::Context;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    kariyer_pdf_server::run()
        .await
        .context("server terminated with an error")
}
