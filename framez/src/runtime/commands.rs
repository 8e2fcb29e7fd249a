use serde::Serialize;

/// A single store mutation, executed by one Lua script.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationCommand {
    InsertDocument(DocumentInsert),
    PatchDocument(DocumentPatch),
    DeleteDocument(DocumentDelete),
    ToggleLike(LikeToggleCommand),
}

impl MutationCommand {
    /// Collection the command writes to, used when mapping script errors.
    pub fn collection(&self) -> &'static str {
        match self {
            MutationCommand::InsertDocument(op) => op.collection,
            MutationCommand::PatchDocument(op) => op.collection,
            MutationCommand::DeleteDocument(op) => op.collection,
            MutationCommand::ToggleLike(_) => crate::keys::LIKES,
        }
    }
}

/// Ordered list of commands executed one after another.
#[derive(Debug, Default)]
pub struct MutationPlan {
    pub commands: Vec<MutationCommand>,
}

impl MutationPlan {
    pub fn single(command: MutationCommand) -> Self {
        Self {
            commands: vec![command],
        }
    }
}

/// Hash index entry mapping a unique value to the owning document.
#[derive(Debug, Clone, Serialize)]
pub struct UniqueIndexEntry {
    pub index_key: String,
    pub field: String,
}

/// Sorted-set index entry ordered by creation time.
///
/// The script scores it `created_ms * 1024 + n`, where `n` counts earlier
/// entries of the same index and millisecond, so equal timestamps keep
/// insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct SortedIndexEntry {
    pub index_key: String,
    pub created_ms: i64,
    pub member: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SortedIndexRemoval {
    pub index_key: String,
    pub member: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentInsert {
    #[serde(skip)]
    pub collection: &'static str,
    pub key: String,
    pub document_id: String,
    pub payload_json: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unique_indexes: Vec<UniqueIndexEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorted_indexes: Vec<SortedIndexEntry>,
}

/// JSON path assignment, e.g. `$.name` to `"Ada"`.
#[derive(Debug, Clone, Serialize)]
pub struct FieldAssignment {
    pub path: String,
    pub value_json: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentPatch {
    #[serde(skip)]
    pub collection: &'static str,
    pub key: String,
    pub document_id: String,
    pub assignments: Vec<FieldAssignment>,
}

#[derive(Debug, Serialize)]
pub struct DocumentDelete {
    #[serde(skip)]
    pub collection: &'static str,
    pub key: String,
    pub document_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorted_indexes: Vec<SortedIndexRemoval>,
}

#[derive(Debug, Serialize)]
pub struct LikeToggleCommand {
    /// Hash of user id to like id for one post.
    pub pair_index_key: String,
    pub by_post_index_key: String,
    /// Document key prefix; the like id is appended.
    pub like_key_prefix: String,
    pub user_id: String,
    pub like_id: String,
    pub payload_json: String,
    pub created_ms: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_serialize_with_snake_case_tag() {
        let command = MutationCommand::DeleteDocument(DocumentDelete {
            collection: "comments",
            key: "fz:framez:comments:c1".into(),
            document_id: "c1".into(),
            sorted_indexes: Vec::new(),
        });
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["delete_document"]["document_id"], "c1");
        assert!(json["delete_document"].get("collection").is_none());
        assert!(json["delete_document"].get("sorted_indexes").is_none());
        assert_eq!(command.collection(), "comments");
    }
}
