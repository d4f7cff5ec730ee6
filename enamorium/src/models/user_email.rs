use charybdis::macros::charybdis_model;
use charybdis::types::{Text, Uuid};
use serde::{Deserialize, Serialize};

/// Claims an email for a single user. Scylla has no unique secondary
/// indexes, so registration takes the claim with an LWT before writing the user.
#[charybdis_model(
    table_name = user_emails,
    partition_keys = [email],
    clustering_keys = [],
    global_secondary_indexes = []
)]
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserEmail {
    pub email: Text,
    pub user_id: Uuid,
}

impl UserEmail {
    pub const CLAIM_QUERY: &'static str = "
        INSERT INTO user_emails (email, user_id)
        VALUES (?, ?)
        IF NOT EXISTS
    ";

    pub const RELEASE_QUERY: &'static str = "
        DELETE FROM user_emails
        WHERE email = ?
        IF user_id = ?
    ";
}
