// Path: crates/consensus/src/custom_tx/command.rs

//! Tokenizer for governance commands carried in transaction payloads.
//!
//! Wire format: `dpos:1:<category>:<event>[:<field>]*`. Classification only looks
//! at structure. Field values are checked later by the validators, so a
//! `Command` borrows its raw tokens from the payload.

use serde::Serialize;

/// First token of every governance command.
pub const DPOS_PREFIX: &str = "dpos";
/// Second token of every governance command.
pub const DPOS_VERSION: &str = "1";

const CATEGORY_EVENT: &str = "event";
const CATEGORY_OPLOG: &str = "oplog";
const CATEGORY_SC: &str = "sc";
const CATEGORY_ADMIN: &str = "admin";

const EVENT_VOTE: &str = "vote";
const EVENT_CONFIRM: &str = "confirm";
const EVENT_PROPOSAL: &str = "proposal";
const EVENT_DECLARE: &str = "declare";
const EVENT_SET_COINBASE: &str = "setcb";

const ADMIN_ADD_SIGNER: &str = "adds";
const ADMIN_DEL_SIGNER: &str = "dels";
const ADMIN_MODIFY_ADMIN: &str = "modadmin";
const ADMIN_MODIFY_REWARD: &str = "modreward";
const ADMIN_MODIFY_RATIO: &str = "modratio";

const MIN_SPLIT_LEN: usize = 4;
const POS_CATEGORY: usize = 2;
const POS_EVENT: usize = 3;
const POS_FIRST_FIELD: usize = 4;

/// Side-chain confirm: hash, number, timestamp, loop info, charging info.
const SC_CONFIRM_MIN_LEN: usize = 9;

/// Sub-commands of the `admin` category. The target address of signer and admin
/// changes is the transaction recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum AdminCommand<'a> {
    /// `adds`: add the recipient to the candidate signers.
    AddSigner,
    /// `dels`: remove the recipient from the candidate signers.
    DelSigner,
    /// `modadmin`: hand the admin role to the recipient.
    ModifyAdmin,
    /// `modreward:<decimal>`: replace the per-block reward.
    ModifyReward(&'a str),
    /// `modratio:<integer>`: replace the miner reward ratio.
    ModifyRatio(&'a str),
    /// Any other operation. Still subject to the admin sender check.
    Unknown(&'a str),
}

/// A structurally classified governance command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "fields", rename_all = "snake_case")]
pub enum Command<'a> {
    /// `admin:<op>[:<value>]`.
    Admin(AdminCommand<'a>),
    /// `event:vote`.
    Vote,
    /// `event:confirm:<number>`.
    Confirm {
        /// The confirmed block number as written.
        confirmed: &'a str,
    },
    /// `event:proposal` followed by key/value pairs.
    Proposal {
        /// Key/value pairs in payload order. A dangling key is dropped.
        pairs: Vec<(&'a str, &'a str)>,
    },
    /// `event:declare` followed by key/value pairs.
    Declare {
        /// Key/value pairs in payload order. A dangling key is dropped.
        pairs: Vec<(&'a str, &'a str)>,
    },
    /// `event:setcb:<scHash>`.
    SetCoinbase {
        /// The side-chain hash as written.
        sc_hash: &'a str,
    },
    /// `sc:confirm:<scHash>:<number>:<timestamp>:<loopInfo>:<chargingInfo>`.
    SideChainConfirm {
        /// The side-chain hash as written.
        hash: &'a str,
        /// The side-chain block number as written.
        number: &'a str,
        /// `#`-separated loop information.
        loop_info: &'a str,
        /// `#`-separated charging information, possibly empty.
        charging_info: &'a str,
    },
    /// `oplog:*`. Recognized and ignored.
    OpLog,
    /// A valid `dpos:1` header whose category, event or arity is not understood.
    /// Carries no consensus effect.
    Inert,
}

impl Command<'_> {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Admin(AdminCommand::AddSigner) => "admin:adds",
            Self::Admin(AdminCommand::DelSigner) => "admin:dels",
            Self::Admin(AdminCommand::ModifyAdmin) => "admin:modadmin",
            Self::Admin(AdminCommand::ModifyReward(_)) => "admin:modreward",
            Self::Admin(AdminCommand::ModifyRatio(_)) => "admin:modratio",
            Self::Admin(AdminCommand::Unknown(_)) => "admin:unknown",
            Self::Vote => "event:vote",
            Self::Confirm { .. } => "event:confirm",
            Self::Proposal { .. } => "event:proposal",
            Self::Declare { .. } => "event:declare",
            Self::SetCoinbase { .. } => "event:setcb",
            Self::SideChainConfirm { .. } => "sc:confirm",
            Self::OpLog => "oplog",
            Self::Inert => "inert",
        }
    }
}

/// Classifies a transaction payload.
///
/// Returns `None` when the payload is not a governance command at all: not
/// UTF-8, shorter than the prefix, fewer than four `:`-separated tokens, or a
/// wrong prefix or version. Such transactions are plain transfers.
pub fn classify(payload: &[u8]) -> Option<Command<'_>> {
    let text = std::str::from_utf8(payload).ok()?;
    classify_str(text)
}

/// [`classify`] for payloads already known to be text.
pub fn classify_str(text: &str) -> Option<Command<'_>> {
    if text.len() < DPOS_PREFIX.len() {
        return None;
    }
    let tokens: Vec<&str> = text.split(':').collect();
    if tokens.len() < MIN_SPLIT_LEN {
        return None;
    }
    if tokens.first() != Some(&DPOS_PREFIX) || tokens.get(1) != Some(&DPOS_VERSION) {
        return None;
    }

    let category = tokens.get(POS_CATEGORY).copied().unwrap_or_default();
    let event = tokens.get(POS_EVENT).copied().unwrap_or_default();
    let fields = tokens.get(POS_FIRST_FIELD..).unwrap_or_default();

    let command = match category {
        CATEGORY_ADMIN => classify_admin(event, fields),
        CATEGORY_EVENT => classify_event(event, fields),
        CATEGORY_SC => classify_side_chain(event, fields),
        CATEGORY_OPLOG => Command::OpLog,
        _ => Command::Inert,
    };
    Some(command)
}

/// Every `admin:` payload is an admin command, so the sender is checked before
/// the operation or its value is looked at. A missing value is empty.
fn classify_admin<'a>(event: &'a str, fields: &[&'a str]) -> Command<'a> {
    let value = fields.first().copied().unwrap_or_default();
    let admin = match event {
        ADMIN_ADD_SIGNER => AdminCommand::AddSigner,
        ADMIN_DEL_SIGNER => AdminCommand::DelSigner,
        ADMIN_MODIFY_ADMIN => AdminCommand::ModifyAdmin,
        ADMIN_MODIFY_REWARD => AdminCommand::ModifyReward(value),
        ADMIN_MODIFY_RATIO => AdminCommand::ModifyRatio(value),
        other => AdminCommand::Unknown(other),
    };
    Command::Admin(admin)
}

fn classify_event<'a>(event: &str, fields: &[&'a str]) -> Command<'a> {
    match event {
        EVENT_VOTE => Command::Vote,
        EVENT_CONFIRM => match fields.first().copied() {
            Some(confirmed) => Command::Confirm { confirmed },
            None => Command::Inert,
        },
        EVENT_PROPOSAL => match key_value_pairs(fields) {
            Some(pairs) => Command::Proposal { pairs },
            None => Command::Inert,
        },
        EVENT_DECLARE => match key_value_pairs(fields) {
            Some(pairs) => Command::Declare { pairs },
            None => Command::Inert,
        },
        EVENT_SET_COINBASE => match fields.first().copied() {
            Some(sc_hash) => Command::SetCoinbase { sc_hash },
            None => Command::Inert,
        },
        _ => Command::Inert,
    }
}

fn classify_side_chain<'a>(event: &str, fields: &[&'a str]) -> Command<'a> {
    if event != EVENT_CONFIRM || fields.len() + POS_FIRST_FIELD < SC_CONFIRM_MIN_LEN {
        return Command::Inert;
    }
    // Field 2 is the side-chain block time; it carries no consensus effect.
    match (
        fields.first().copied(),
        fields.get(1).copied(),
        fields.get(3).copied(),
        fields.get(4).copied(),
    ) {
        (Some(hash), Some(number), Some(loop_info), Some(charging_info)) => {
            Command::SideChainConfirm {
                hash,
                number,
                loop_info,
                charging_info,
            }
        }
        _ => Command::Inert,
    }
}

/// Pairs up trailing tokens. At least one complete pair is required.
fn key_value_pairs<'a>(fields: &[&'a str]) -> Option<Vec<(&'a str, &'a str)>> {
    if fields.len() < 2 {
        return None;
    }
    Some(
        fields
            .chunks_exact(2)
            .filter_map(|pair| match pair {
                [key, value] => Some((*key, *value)),
                _ => None,
            })
            .collect(),
    )
}
