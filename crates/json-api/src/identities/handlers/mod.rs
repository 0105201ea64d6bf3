//! Identity Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod status;
pub(crate) mod update;

use brix::identities::LoginId;
use salvo::prelude::StatusError;

use crate::extensions::*;

fn parse_login(raw: &str) -> Result<LoginId, StatusError> {
    LoginId::parse(raw).or_400("Invalid login")
}
