use anyhow::{anyhow, Context};

use crate::api::dto::{ApprovalAction, ApprovalDecision, EntityId, LoginRequest, NewUser};
use crate::api::ApiClient;
use crate::dispatch::ThunkOutcome;
use crate::slices::approvals::{self, ApprovalsIntent};
use crate::slices::listing::{ListQuery, ListingIntent};
use crate::slices::{session, spawn_app_store, users, AppStore};

use super::output;
use super::{ApprovalCommands, Cli, Commands, ConfigCommands, UserCommands, PASSWORD_ENV};

/// Execute one parsed command line.
pub async fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = match &cli.command {
        Commands::Config { command } => return run_config(cli, command),
        _ => cli.load_config()?,
    };
    if let Commands::Users {
        command: UserCommands::List {
            page_size: Some(size),
            ..
        },
    } = &cli.command
    {
        config.listing.page_size = *size;
        config.validate()?;
    }

    let api = ApiClient::from_config(&config)?;
    let store = spawn_app_store(&config);

    match &cli.command {
        Commands::Users { command } => run_users(&store, &api, command).await,
        Commands::Roles => {
            let roles = settled(users::fetch_roles(&store, &api).await?)?;
            print!("{}", output::roles_table(&roles));
            Ok(())
        }
        Commands::Approvals { command } => run_approvals(&store, &api, command).await,
        Commands::Login { email, print_token } => {
            let password = std::env::var(PASSWORD_ENV)
                .with_context(|| format!("{PASSWORD_ENV} is not set"))?;
            let credentials = LoginRequest {
                email: email.clone(),
                password,
            };
            let info = settled(session::login(&store, &api, &credentials).await?)?;
            match info.user {
                Some(user) => println!("Signed in as {} <{}>", user.name, user.email),
                None => println!("Signed in"),
            }
            if *print_token {
                if let Some(token) = api.tokens().access_token {
                    println!("{}", token.expose());
                }
            }
            Ok(())
        }
        Commands::Refresh => {
            settled(session::refresh_session(&store, &api).await?)?;
            println!("Session refreshed");
            Ok(())
        }
        Commands::Config { command } => run_config(cli, command),
    }
}

fn run_config(cli: &Cli, command: &ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Path => println!("{}", cli.config_path().display()),
        ConfigCommands::Show => {
            let config = cli.load_config()?;
            print!("{}", output::masked_config(&config)?);
        }
    }
    Ok(())
}

async fn run_users(
    store: &AppStore,
    api: &ApiClient,
    command: &UserCommands,
) -> anyhow::Result<()> {
    match command {
        UserCommands::List { search, all, .. } => {
            let first = match search {
                Some(term) => users::search_users(store, api, term).await?,
                None => users::fetch_user_management(store, api).await?,
            };
            if let Some(outcome) = first {
                settled(outcome)?;
            }
            if *all {
                while let Some(outcome) = users::fetch_user_management(store, api).await? {
                    settled(outcome)?;
                }
            }

            let state = store.current();
            print!("{}", output::users_table(state.users.users.items()));
            if state.users.users.list().has_more() {
                println!("(more users available; pass --all to fetch every page)");
            }
            Ok(())
        }
        UserCommands::Add {
            name,
            email,
            role,
            designation,
        } => {
            let user = NewUser {
                name: name.clone(),
                email: email.clone(),
                role: role.clone(),
                designation: designation.clone(),
            };
            let created = settled(users::add_new_user(store, api, &user).await?)?;
            println!("Created user {} <{}>", created.id, created.email);
            Ok(())
        }
    }
}

async fn run_approvals(
    store: &AppStore,
    api: &ApiClient,
    command: &ApprovalCommands,
) -> anyhow::Result<()> {
    let (id, decision, remark) = match command {
        ApprovalCommands::List { status, all } => {
            let query = ListQuery {
                search: None,
                status: status.clone(),
            };
            store
                .dispatch(ApprovalsIntent::Tickets(ListingIntent::QueryChanged(query)))
                .await?;
            if let Some(outcome) = approvals::load_more_approvals(store, api).await? {
                settled(outcome)?;
            }
            if *all {
                while let Some(outcome) = approvals::load_more_approvals(store, api).await? {
                    settled(outcome)?;
                }
            }
            print_queue(store);
            return Ok(());
        }
        ApprovalCommands::Approve { id, remark } => (id, ApprovalDecision::Approve, remark),
        ApprovalCommands::Reject { id, remark } => (id, ApprovalDecision::Reject, remark),
    };

    let action = ApprovalAction {
        ticket_id: EntityId::new(id.as_str()),
        action: decision,
        remark: remark.clone(),
    };
    settled(approvals::approve_then_refetch(store, api, &action).await?)?;
    let verb = match decision {
        ApprovalDecision::Approve => "approved",
        ApprovalDecision::Reject => "rejected",
    };
    println!("Ticket {} {}", action.ticket_id, verb);

    let state = store.current();
    match state.approvals.tickets.fetch().error() {
        Some(error) => eprintln!("Could not reload the queue:\n{}", output::failure(error)),
        None => print_queue(store),
    }
    Ok(())
}

fn print_queue(store: &AppStore) {
    let state = store.current();
    print!("{}", output::tickets_table(state.approvals.tickets.items()));
}

/// Turn a rejected thunk into a command error carrying the bullet lines.
fn settled<T>(outcome: ThunkOutcome<T>) -> anyhow::Result<T> {
    outcome.map_err(|error| anyhow!("{}", output::failure(&error)))
}
