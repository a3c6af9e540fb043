//! Subcommands of the `pinner` binary

use crate::{
    Pinner, PinnerGeneric, Settings,
    session::HttpTransport,
    types::{PinCreated, PinDraft},
};
use anyhow::{Result, bail};
use clap::Subcommand;
use serde_json::Value;

/// What the binary should do once logged in
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Create a new pin
    Pin {
        /// Board to add the pin to
        #[arg(short, long, value_name = "BOARD_ID")]
        board: String,

        /// Image URL
        #[arg(short, long, value_name = "URL")]
        image: String,

        /// Link the pin points at
        #[arg(short, long, value_name = "URL")]
        link: String,

        /// Pin description
        #[arg(short, long, value_name = "TEXT")]
        description: Option<String>,

        /// Share the pin on the connected Facebook account
        #[arg(long)]
        share_facebook: bool,
    },

    /// List boards as id to name
    Boards,

    /// List pins, optionally only those on one board
    Pins {
        /// Only pins on this board
        #[arg(short, long, value_name = "BOARD_ID")]
        board: Option<String>,
    },

    /// Show profile data of the logged-in user
    Me,
}

impl Command {
    /// Pin fields for the `pin` subcommand
    pub fn pin_draft(&self) -> Option<PinDraft> {
        match self {
            Self::Pin {
                board,
                image,
                link,
                description,
                share_facebook,
            } => {
                let mut draft = PinDraft::new()
                    .with_board_id(board)
                    .with_image_url(image)
                    .with_link(link)
                    .with_share_facebook(*share_facebook);
                if let Some(description) = description {
                    draft = draft.with_description(description);
                }
                Some(draft)
            }
            _ => None,
        }
    }
}

/// Run a command against the real site
pub async fn run_command(settings: &Settings, command: &Command) -> Result<Value> {
    if settings.account.login.is_none() || settings.account.password.is_none() {
        bail!(
            "Missing credentials: use --login/--password, PINNER_LOGIN/PINNER_PASSWORD or the [account] section of the config file"
        );
    }

    let mut pinner = Pinner::new(settings)?;
    execute(&mut pinner, command).await
}

/// Run a command on an already configured session and render its output
pub async fn execute<T: HttpTransport>(
    pinner: &mut PinnerGeneric<T>,
    command: &Command,
) -> Result<Value> {
    let output = match command {
        Command::Pin { .. } => {
            if let Some(draft) = command.pin_draft() {
                pinner.configure_pin(draft);
            }
            let pin_id = pinner.create_pin().await?;
            serde_json::to_value(PinCreated::new(pin_id))?
        }
        Command::Boards => serde_json::to_value(pinner.fetch_boards().await?)?,
        Command::Pins { board } => Value::Array(pinner.fetch_pins(board.as_deref()).await?),
        Command::Me => Value::Object(pinner.fetch_user_data().await?),
    };

    Ok(output)
}
