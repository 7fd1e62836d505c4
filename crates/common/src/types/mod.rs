use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Banner returned by `GET /`
#[derive(Serialize, Deserialize, Debug)]
pub struct Banner {
    pub message: String,
}
