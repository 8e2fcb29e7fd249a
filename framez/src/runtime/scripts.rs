use redis::Script;
use std::sync::LazyLock;

pub const INSERT_DOCUMENT_SCRIPT_BODY: &str = include_str!("../../lua/insert_document.lua");
pub const PATCH_DOCUMENT_SCRIPT_BODY: &str = include_str!("../../lua/patch_document.lua");
pub const DELETE_DOCUMENT_SCRIPT_BODY: &str = include_str!("../../lua/delete_document.lua");
pub const TOGGLE_LIKE_SCRIPT_BODY: &str = include_str!("../../lua/toggle_like.lua");

pub static INSERT_DOCUMENT_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(INSERT_DOCUMENT_SCRIPT_BODY));
pub static PATCH_DOCUMENT_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(PATCH_DOCUMENT_SCRIPT_BODY));
pub static DELETE_DOCUMENT_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(DELETE_DOCUMENT_SCRIPT_BODY));
pub static TOGGLE_LIKE_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(TOGGLE_LIKE_SCRIPT_BODY));
