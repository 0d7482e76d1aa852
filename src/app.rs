use crate::api::NewsApi;
use crate::comments::{reduce, CommentAction};
use crate::config::Config;
use crate::form::{self, text, FieldEvent, FormState, SubmitOutcome};
use crate::listing::{paginate_link, FetchOutcome, FilterType, Listing, PAGE_PARAM};
use crate::session::SessionStore;
use anyhow::{anyhow, Result};
use log::*;

/// Specify the commands the front-end can run.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    /// Show one page of a listing. `page` is passed through unparsed so
    /// out-of-range and malformed values exercise page reconciliation.
    List {
        filter_type: FilterType,
        key: Option<String>,
        page: Option<String>,
    },
    Read {
        id: String,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    Comment {
        article_id: String,
        text: String,
    },
}

/// Oversees the API client, session and configuration for one command.
///
pub struct App {
    api: NewsApi,
    config: Config,
}

impl App {
    /// Run `command` according to the given configuration. Returns the result
    /// of the command execution.
    ///
    pub async fn start(config: Config, command: Command) -> Result<()> {
        info!("Starting application...");
        let session = SessionStore::from_token(config.access_token.clone());
        let api = NewsApi::new(&config.api_url, session, config.request_timeout())?;
        let mut app = App { api, config };

        match command {
            Command::List {
                filter_type,
                key,
                page,
            } => app.list(filter_type, key, page).await?,
            Command::Read { id } => app.read(&id).await?,
            Command::Login { email, password } => app.login(email, password).await?,
            Command::Logout => app.logout()?,
            Command::Comment { article_id, text } => app.comment(&article_id, text).await?,
        }

        info!("Exiting application...");
        Ok(())
    }

    /// Print one page of a listing with its page links.
    ///
    async fn list(
        &self,
        filter_type: FilterType,
        key: Option<String>,
        page: Option<String>,
    ) -> Result<()> {
        if filter_type == FilterType::Search {
            let mut search = form::search_form();
            let term = key.clone().unwrap_or_default();
            search.on_field_change("search", FieldEvent::Input(term));
            if !search.validate_all() {
                print_errors(&search);
                return Err(anyhow!("Invalid search term"));
            }
        }

        let mut location = paginate_link(1, filter_type, key.as_deref());
        if let Some(page) = page {
            location.set_query_param(PAGE_PARAM, &page);
        }

        let mut listing = Listing::new();
        let mut outcome = listing.navigate(&self.api, location).await;
        if outcome == FetchOutcome::Failed {
            warn!("Listing fetch failed, retrying once...");
            outcome = listing
                .get_fetcher()
                .refetch(&self.api)
                .await
                .unwrap_or(FetchOutcome::Failed);
        }

        let pagination = listing.get_pagination();
        println!("{}", listing.get_title());
        println!("{}", listing.get_location());
        println!();
        if outcome == FetchOutcome::Failed {
            let reason = listing.get_fetcher().get_last_error().await;
            println!("Новините не могат да бъдат заредени: {}", reason.unwrap_or_default());
        }
        for article in listing.get_fetcher().get_items().await {
            println!(
                "  [{}] {} {}",
                article.id,
                article.title,
                article.created_at.unwrap_or_default()
            );
        }
        println!();

        let window = pagination.window();
        let mut links = vec![];
        if let Some(first) = window.first {
            links.push(format!("«{}", first));
        }
        if let Some(previous) = window.previous {
            links.push(format!("‹{}", previous));
        }
        for page in &window.pages {
            if *page == pagination.get_current_page() {
                links.push(format!("[{}]", page));
            } else {
                links.push(page.to_string());
            }
        }
        if let Some(next) = window.next {
            links.push(format!("{}›", next));
        }
        if let Some(last) = window.last {
            links.push(format!("{}»", last));
        }
        println!(
            "{}  ({} / {}, {} total)",
            links.join(" "),
            pagination.get_current_page(),
            pagination.get_total_pages(),
            pagination.get_total_items()
        );
        Ok(())
    }

    /// Print an article with its comments.
    ///
    async fn read(&self, id: &str) -> Result<()> {
        let article = self.api.article(id).await?;
        let comments = reduce(vec![], CommentAction::GetAll(self.api.comments(id).await?));

        println!("{}", article.title);
        if let Some(created_at) = &article.created_at {
            println!("{}", created_at);
        }
        println!();
        println!("{}", article.content);
        println!();
        println!("Коментари ({})", comments.len());
        for comment in comments {
            println!(
                "  {}: {}",
                comment.author_name.unwrap_or_else(|| "Анонимен".to_string()),
                comment.content
            );
        }
        Ok(())
    }

    /// Validate the login form, authenticate and persist the token.
    ///
    async fn login(&mut self, email: String, password: String) -> Result<()> {
        let mut login = form::login_form();
        login
            .on_field_change("email", FieldEvent::Input(email))
            .on_field_change("password", FieldEvent::Input(password));

        let api = &self.api;
        let outcome = login
            .on_submit(|values| async move {
                api.login(text(&values, "email"), text(&values, "password"))
                    .await
                    .map_err(|e| e.user_message())
            })
            .await;

        match outcome {
            SubmitOutcome::Submitted(session) => {
                self.config.save_token(session.access_token)?;
                match session.user {
                    Some(user) => println!("Здравей, {}!", user.username),
                    None => println!("Влязохте успешно."),
                }
                Ok(())
            }
            _ => {
                print_errors(&login);
                Err(anyhow!("Login failed"))
            }
        }
    }

    fn logout(&mut self) -> Result<()> {
        self.api.logout();
        self.config.clear_token()?;
        println!("Излязохте от профила си.");
        Ok(())
    }

    /// Validate the comment form and post it.
    ///
    async fn comment(&self, article_id: &str, body: String) -> Result<()> {
        if !self.api.session().is_authenticated() {
            return Err(anyhow!("Login required to comment"));
        }
        let mut comment = form::comment_form();
        comment.on_field_change("comment", FieldEvent::Input(body));

        let api = &self.api;
        let outcome = comment
            .on_submit(|values| async move {
                api.create_comment(&form::comment_draft(article_id, &values))
                    .await
                    .map_err(|e| e.user_message())
            })
            .await;

        match outcome {
            SubmitOutcome::Submitted(created) => {
                println!("Коментарът е публикуван ({}).", created.id);
                Ok(())
            }
            _ => {
                print_errors(&comment);
                Err(anyhow!("Comment was not posted"))
            }
        }
    }
}

fn print_errors(form: &FormState) {
    for (field, message) in form.get_errors() {
        eprintln!("{}: {}", field, message);
    }
}
