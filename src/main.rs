use std::time::{Duration, Instant};

use anyhow::Context as _;
use serenity::all::{
    Client, CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateInteractionResponse, CreateInteractionResponseMessage, EventHandler, GatewayIntents,
    GuildId, Interaction, Ready,
};
use serenity::async_trait;
use shared::{
    config::Config,
    error::CommandError,
    requests::{PubgClient, RiotClient},
    types::DiscordOutput,
};
use shuttle_runtime::SecretStore;
use tracing::{error, info, warn};

mod baseline;
mod champions;
pub mod matches;
pub mod pubg;
pub mod shared;
mod stats;

use champions::ChampionNames;

const LOL_COMMAND: &str = "lol-history";
const PUBG_COMMAND: &str = "pubg-history";

struct Bot {
    discord_guild_id: GuildId,
    riot: RiotClient,
    pubg: PubgClient,
    champions: ChampionNames,
}

#[async_trait]
impl EventHandler for Bot {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        let lol_history = CreateCommand::new(LOL_COMMAND)
            .description("Recent League of Legends matches for a Riot ID (e.g. Hide on bush#KR1)")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "riot_id", "name#tag")
                    .required(true),
            );

        let pubg_history = CreateCommand::new(PUBG_COMMAND)
            .description("Detailed stats of the last 10 PUBG matches")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "nickname", "PUBG nickname")
                    .required(true),
            );

        match self
            .discord_guild_id
            .set_commands(&ctx.http, vec![lol_history, pubg_history])
            .await
        {
            Ok(commands) => info!(
                "Registered commands: {:?}",
                commands.iter().map(|c| c.name.as_str()).collect::<Vec<_>>()
            ),
            Err(err) => error!("Failed to register commands: {}", err),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let builder = CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new());
        if let Err(err) = command.create_response(&ctx.http, builder).await {
            error!("Failed to defer /{}: {}", command.data.name, err);
            return;
        }
        let start = Instant::now();

        let result = match command.data.name.as_str() {
            LOL_COMMAND => {
                matches::handle_matches_command(
                    string_option(&command, "riot_id"),
                    &self.riot,
                    &self.champions,
                )
                .await
            }
            PUBG_COMMAND => {
                pubg::handle_pubg_command(string_option(&command, "nickname"), &self.pubg).await
            }
            other => {
                warn!("Unknown command: {}", other);
                return;
            }
        };

        if let Err(err) = &result {
            warn!("/{} failed: {:?}", command.data.name, err);
        }
        let output = into_output(result, start.elapsed());

        if let Err(err) = command
            .edit_response(&ctx.http, output.into_edit_response())
            .await
        {
            error!("Failed to respond to /{}: {}", command.data.name, err);
        }
    }
}

fn string_option<'a>(command: &'a CommandInteraction, name: &str) -> &'a str {
    command
        .data
        .options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_str())
        .unwrap_or_default()
}

/// Turns a handler result into what gets sent: the embed, or the error's
/// message as a single line.
fn into_output(result: Result<DiscordOutput, CommandError>, elapsed: Duration) -> DiscordOutput {
    match result {
        Ok(mut output) => {
            output.footer = format!("({:?})", elapsed);
            output
        }
        Err(err) => DiscordOutput::text(err.to_string()),
    }
}

#[shuttle_runtime::main]
async fn serenity(
    #[shuttle_runtime::Secrets] secret_store: SecretStore,
) -> shuttle_serenity::ShuttleSerenity {
    let config = Config::from_secrets(&secret_store)?;

    let http = reqwest::Client::new();
    let champions = ChampionNames::fetch(&http)
        .await
        .context("Failed to load champion names")?;

    let client = get_client(&config, http, champions).await?;
    Ok(client.into())
}

pub async fn get_client(
    config: &Config,
    http: reqwest::Client,
    champions: ChampionNames,
) -> anyhow::Result<Client> {
    // Slash commands only, no gateway events needed.
    let intents = GatewayIntents::empty();

    Client::builder(&config.discord_token, intents)
        .event_handler(Bot {
            discord_guild_id: GuildId::new(config.discord_guild_id),
            riot: RiotClient::new(http.clone(), &config.riot_api_key),
            pubg: PubgClient::new(http, &config.pubg_api_key),
            champions,
        })
        .await
        .context("Err creating client")
}
