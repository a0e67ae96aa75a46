use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = qb_search::Args::parse();
	qb_search::run(args).await
}
