use crate::commands::{comments, likes, posts, users};

#[derive(Clone, Copy)]
pub struct ExampleGroup {
    pub title: &'static str,
    pub commands: &'static [&'static str],
}

#[derive(Clone, Copy)]
pub struct CommandExample {
    pub name: &'static str,
    pub groups: &'static [ExampleGroup],
}

pub fn command_examples() -> &'static [CommandExample] {
    &[
        CommandExample {
            name: "user",
            groups: users::EXAMPLES,
        },
        CommandExample {
            name: "post",
            groups: posts::EXAMPLES,
        },
        CommandExample {
            name: "comment",
            groups: comments::EXAMPLES,
        },
        CommandExample {
            name: "like",
            groups: likes::EXAMPLES,
        },
    ]
}
