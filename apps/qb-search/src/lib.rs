pub mod render;

use std::{io::Write, path::PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use color_eyre::eyre;
use tracing_subscriber::EnvFilter;

use qb_config::Config;
use qb_domain::{BudgetBucket, GoalBucket, PersonaTag, TimeBucket};
use qb_service::{SearchSession, SearchStatus};
use qb_storage::{FilePersonaStore, PersonaStore};

#[derive(Debug, Parser)]
#[command(
	version = qb_cli::VERSION,
	rename_all = "kebab",
	styles = qb_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Find recipes for what you have and how you want to eat.
	Search(SearchArgs),
	/// Show or change the stored persona.
	Persona {
		#[command(subcommand)]
		action: Option<PersonaAction>,
	},
}

#[derive(Debug, ClapArgs)]
pub struct SearchArgs {
	/// e.g. "Under 20 min", "Under 30 min", "No limit".
	#[arg(long, value_name = "LABEL")]
	pub time: Option<String>,
	/// e.g. "Cheap", "Moderate", "Doesn't matter".
	#[arg(long, value_name = "LABEL")]
	pub budget: Option<String>,
	/// e.g. "High protein", "Balanced", "Light / low calorie".
	#[arg(long, value_name = "LABEL")]
	pub goal: Option<String>,
	#[arg(long = "ingredient", short = 'i', value_name = "NAME")]
	pub ingredients: Vec<String>,
	/// Search the built-in catalog instead of the ranking service.
	#[arg(long)]
	pub local: bool,
	/// Print the outcome as JSON.
	#[arg(long)]
	pub json: bool,
	pub query: Vec<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum PersonaAction {
	Show,
	Set { persona: String },
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = qb_config::load(&args.config)?;

	init_tracing(&config);

	match args.command {
		Command::Search(search) => run_search(config, search, &mut std::io::stdout()).await,
		Command::Persona { action } =>
			run_persona(&config, action.unwrap_or(PersonaAction::Show), &mut std::io::stdout()),
	}
}

pub async fn run_search<W>(mut config: Config, args: SearchArgs, out: &mut W) -> color_eyre::Result<()>
where
	W: Write,
{
	if args.local {
		config.search.mode = "local".to_string();
	}

	let session = SearchSession::from_config(&config)?;

	session.update_filters(|filters| {
		filters.time = args.time.as_deref().map(TimeBucket::parse);
		filters.budget = args.budget.as_deref().map(BudgetBucket::parse);
		filters.goal = args.goal.as_deref().map(GoalBucket::parse);

		for ingredient in &args.ingredients {
			filters.add_ingredient(ingredient);
		}
	});

	let mut updates = session.subscribe();
	let side_fact = tokio::spawn(async move {
		if let Ok(outcome) =
			updates.wait_for(|outcome| outcome.is_loading() && outcome.side_fact.is_some()).await
			&& let Some(fact) = outcome.side_fact.as_deref()
		{
			eprintln!("{}", render::render_side_fact(fact));
		}
	});
	let outcome = session.submit(&args.query.join(" ")).await;

	side_fact.abort();

	if args.json {
		writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?;
	} else {
		let persona = session.resolve_persona();

		write!(out, "{}", render::render_outcome(&outcome, persona))?;
	}

	if outcome.status == SearchStatus::Error {
		return Err(eyre::eyre!(outcome.error_detail.unwrap_or_default()));
	}

	Ok(())
}

pub fn run_persona<W>(config: &Config, action: PersonaAction, out: &mut W) -> color_eyre::Result<()>
where
	W: Write,
{
	let store = FilePersonaStore::new(&config.persona.store_path);

	match action {
		PersonaAction::Show => match store.get()? {
			Some(persona) => writeln!(out, "{persona} ({})", persona.display_name())?,
			None => writeln!(out, "{} (default, not stored)", config.persona.default)?,
		},
		PersonaAction::Set { persona } => {
			let persona = persona.parse::<PersonaTag>()?;

			store.set(persona)?;
			tracing::info!(%persona, path = %store.path().display(), "Persona updated.");
			writeln!(out, "Optimized for {}.", persona.display_name())?;
		},
	}

	Ok(())
}

fn init_tracing(config: &Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}
