use crate::cli::{ConfigArgs, ListArgs};
use ethio_football::config::Config;
use ethio_football::content::models::{
    Author, League, LeagueScoped, Match, Player, Season, Team, TopScorer, User,
};
use ethio_football::content::normalize::TimestampPolicy;
use ethio_football::content::{ContentApi, HttpSource, RecordSource, Resource, Schema};
use ethio_football::error::AppError;
use ethio_football::server;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Handles the `serve` command.
///
/// Loads the configuration and runs the JSON API until Ctrl-C.
pub async fn handle_serve_command(bind: Option<&str>) -> Result<(), AppError> {
    let config = Config::load().await?;
    server::serve(&config, bind).await
}

/// Handles the `list` command.
///
/// Fetches one collection through the content API, validates it and prints
/// it to stdout as pretty JSON. Validation failures print every violation.
pub async fn handle_list_command(args: &ListArgs) -> Result<(), AppError> {
    let config = Config::load().await?;
    let policy = if args.strict {
        TimestampPolicy::Strict
    } else {
        config.timestamp_policy()
    };
    let api = ContentApi::new(HttpSource::from_config(&config)?).with_policy(policy);
    info!(
        "Listing {} from {}",
        args.resource.path(),
        api.source().api_base_url()
    );

    let league = args.league.as_deref();
    if args.current && args.resource != Resource::Seasons {
        return Err(AppError::config_error("--current only applies to seasons"));
    }

    let output = match args.resource {
        Resource::Leagues => match league {
            Some(slug) => {
                let found = api.find_league(slug).await?;
                if found.is_none() {
                    return Err(AppError::config_error(format!("No league found for '{slug}'")));
                }
                to_json(&found)?
            }
            None => to_json(&api.list::<League>().await?)?,
        },
        Resource::Matches => scoped::<_, Match>(&api, league).await?,
        Resource::Teams => scoped::<_, Team>(&api, league).await?,
        Resource::TopScorers => scoped::<_, TopScorer>(&api, league).await?,
        Resource::Players => match league {
            Some(slug) => to_json(&api.players_by_league(slug).await?)?,
            None => to_json(&api.list::<Player>().await?)?,
        },
        Resource::Seasons => {
            reject_league_filter(args)?;
            if args.current {
                to_json(&api.current_season().await?)?
            } else {
                to_json(&api.list::<Season>().await?)?
            }
        }
        Resource::Users => {
            reject_league_filter(args)?;
            to_json(&api.list::<User>().await?)?
        }
        Resource::Authors => {
            reject_league_filter(args)?;
            to_json(&api.list::<Author>().await?)?
        }
    };

    println!("{output}");
    Ok(())
}

/// Handles the `config` command.
///
/// With no update flags, or with `--list`, displays the current settings.
/// Otherwise updates the config file. Environment overrides are not written
/// back.
pub async fn handle_config_command(args: &ConfigArgs) -> Result<(), AppError> {
    if !args.has_updates() {
        return Config::display().await;
    }

    let config_path = Config::get_config_path();
    let mut config = if Path::new(&config_path).exists() {
        Config::load_from_path(&config_path).await?
    } else {
        Config::default()
    };

    if let Some(api_base_url) = &args.api_base_url {
        config.api_base_url = api_base_url.clone();
    }
    if let Some(provider_url) = &args.provider_url {
        config.provider_url = Some(provider_url.clone());
    }
    if let Some(new_log_path) = &args.log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");

    if args.list {
        Config::display().await?;
    }
    Ok(())
}

async fn scoped<S, T>(api: &ContentApi<S>, league: Option<&str>) -> Result<String, AppError>
where
    S: RecordSource,
    T: Schema + LeagueScoped + Serialize,
{
    match league {
        Some(slug) => to_json(&api.by_league_slug::<T>(slug).await?),
        None => to_json(&api.list::<T>().await?),
    }
}

fn reject_league_filter(args: &ListArgs) -> Result<(), AppError> {
    if args.league.is_some() {
        return Err(AppError::config_error(format!(
            "{} are not scoped to a league; drop --league",
            args.resource.path()
        )));
    }
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json_pretty_prints() {
        let output = to_json(&vec!["premier-league"]).unwrap();
        assert_eq!(output, "[\n  \"premier-league\"\n]");
    }

    #[test]
    fn test_league_filter_rejected_for_unscoped_resources() {
        let args = ListArgs {
            resource: Resource::Authors,
            league: Some("premier".to_string()),
            current: false,
            strict: false,
        };
        let error = reject_league_filter(&args).unwrap_err();
        assert!(error.to_string().contains("authors"));
    }
}
