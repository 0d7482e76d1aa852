use anyhow::{anyhow, Result};
use clap::{crate_version, App as Cli, AppSettings, Arg, ArgMatches, SubCommand};
use log::LevelFilter;
use news_portal::app::{App, Command};
use news_portal::config::Config;
use news_portal::listing::FilterType;
use news_portal::logger;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;

    let level = if matches.is_present("verbose") {
        LevelFilter::Debug
    } else {
        logger::parse_level(&config.log_level)
    };
    logger::init(level)?;

    App::start(config, command(&matches)?).await
}

fn cli() -> Cli<'static, 'static> {
    Cli::new("news-portal")
        .version(crate_version!())
        .about("Browse and comment on the regional news portal")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .long("config")
                .short("c")
                .takes_value(true)
                .value_name("DIR")
                .global(true)
                .help("Directory holding config.yml"),
        )
        .arg(
            Arg::with_name("verbose")
                .long("verbose")
                .short("v")
                .global(true)
                .help("Log at debug level"),
        )
        .subcommand(
            SubCommand::with_name("list")
                .about("Show one page of news")
                .arg(
                    Arg::with_name("category")
                        .long("category")
                        .takes_value(true)
                        .value_name("SLUG")
                        .conflicts_with_all(&["region", "search"]),
                )
                .arg(
                    Arg::with_name("region")
                        .long("region")
                        .takes_value(true)
                        .value_name("SLUG")
                        .conflicts_with("search"),
                )
                .arg(
                    Arg::with_name("search")
                        .long("search")
                        .takes_value(true)
                        .value_name("TERM"),
                )
                .arg(
                    Arg::with_name("page")
                        .long("page")
                        .short("p")
                        .takes_value(true)
                        .value_name("N"),
                ),
        )
        .subcommand(
            SubCommand::with_name("read")
                .about("Show an article and its comments")
                .arg(Arg::with_name("id").required(true)),
        )
        .subcommand(
            SubCommand::with_name("login")
                .about("Log in and remember the session")
                .arg(Arg::with_name("email").long("email").takes_value(true).required(true))
                .arg(
                    Arg::with_name("password")
                        .long("password")
                        .takes_value(true)
                        .required(true),
                ),
        )
        .subcommand(SubCommand::with_name("logout").about("Forget the stored session"))
        .subcommand(
            SubCommand::with_name("comment")
                .about("Comment on an article")
                .arg(Arg::with_name("id").required(true))
                .arg(Arg::with_name("text").long("text").takes_value(true).required(true)),
        )
}

fn command(matches: &ArgMatches) -> Result<Command> {
    match matches.subcommand() {
        ("list", Some(m)) => {
            let (filter_type, key) = if let Some(slug) = owned(m, "category") {
                (FilterType::Category, Some(slug))
            } else if let Some(slug) = owned(m, "region") {
                (FilterType::Region, Some(slug))
            } else if let Some(term) = owned(m, "search") {
                (FilterType::Search, Some(term))
            } else {
                (FilterType::All, None)
            };
            Ok(Command::List {
                filter_type,
                key,
                page: owned(m, "page"),
            })
        }
        ("read", Some(m)) => Ok(Command::Read {
            id: owned(m, "id").unwrap_or_default(),
        }),
        ("login", Some(m)) => Ok(Command::Login {
            email: owned(m, "email").unwrap_or_default(),
            password: owned(m, "password").unwrap_or_default(),
        }),
        ("logout", Some(_)) => Ok(Command::Logout),
        ("comment", Some(m)) => Ok(Command::Comment {
            article_id: owned(m, "id").unwrap_or_default(),
            text: owned(m, "text").unwrap_or_default(),
        }),
        (name, _) => Err(anyhow!("Unknown command '{}'", name)),
    }
}

fn owned(matches: &ArgMatches, name: &str) -> Option<String> {
    matches.value_of(name).map(str::to_owned)
}
