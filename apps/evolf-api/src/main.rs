use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = evolf_api::Args::parse();

	evolf_api::run(args).await
}
