use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TakeQuery {
    pub take: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub noreports: Option<String>,
}
