use std::borrow::Cow;

use redis::aio::ConnectionLike;
use serde_json::Value;

use crate::{
    errors::FramezError,
    runtime::{
        commands::{MutationCommand, MutationPlan},
        scripts::{DELETE_DOCUMENT_SCRIPT, INSERT_DOCUMENT_SCRIPT, PATCH_DOCUMENT_SCRIPT, TOGGLE_LIKE_SCRIPT},
    },
};

/// Runs every command of `plan` through its Lua script and collects the decoded replies.
pub async fn execute_plan<C>(conn: &mut C, plan: &MutationPlan) -> Result<Vec<Value>, FramezError>
where
    C: ConnectionLike + Send,
{
    let mut responses = Vec::with_capacity(plan.commands.len());

    for command in &plan.commands {
        let script = match command {
            MutationCommand::InsertDocument(_) => &*INSERT_DOCUMENT_SCRIPT,
            MutationCommand::PatchDocument(_) => &*PATCH_DOCUMENT_SCRIPT,
            MutationCommand::DeleteDocument(_) => &*DELETE_DOCUMENT_SCRIPT,
            MutationCommand::ToggleLike(_) => &*TOGGLE_LIKE_SCRIPT,
        };

        let payload = serde_json::to_string(command).map_err(|err| FramezError::Other {
            message: Cow::Owned(format!("failed to serialize command: {err}")),
        })?;

        let mut invocation = script.prepare_invoke();
        invocation.arg(payload);
        let raw: String = invocation.invoke_async(conn).await.map_err(FramezError::from)?;

        let value: Value = serde_json::from_str(&raw).map_err(|err| FramezError::Other {
            message: Cow::Owned(format!("failed to parse lua response: {err}")),
        })?;

        if let Some(error) = value.get("error") {
            return Err(script_error(command, error, &value));
        }

        responses.push(value);
    }

    Ok(responses)
}

fn script_error(command: &MutationCommand, error: &Value, reply: &Value) -> FramezError {
    let text = |field: &str| {
        reply
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default()
    };
    match error.as_str() {
        Some("unique_violation") | Some("document_exists") => FramezError::UniqueViolation {
            index: text("index"),
            existing_id: text("existing_id"),
        },
        Some("entity_not_found") => FramezError::not_found(command.collection(), text("entity_id")),
        Some(other) => FramezError::Other {
            message: Cow::Owned(other.to_string()),
        },
        None => FramezError::Other {
            message: Cow::Borrowed("lua_error"),
        },
    }
}

#[allow(async_fn_in_trait)]
pub trait MutationExecutor {
    async fn execute(&mut self, plan: MutationPlan) -> Result<Vec<Value>, FramezError>;
}

pub struct RedisExecutor<'a, C>
where
    C: ConnectionLike + Send,
{
    connection: &'a mut C,
}

impl<'a, C> RedisExecutor<'a, C>
where
    C: ConnectionLike + Send,
{
    pub fn new(connection: &'a mut C) -> Self {
        Self { connection }
    }
}

impl<'a, C> MutationExecutor for RedisExecutor<'a, C>
where
    C: ConnectionLike + Send,
{
    async fn execute(&mut self, plan: MutationPlan) -> Result<Vec<Value>, FramezError> {
        execute_plan(self.connection, &plan).await
    }
}
