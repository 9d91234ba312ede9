pub struct CommandDef {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

pub static COMMANDS: &[CommandDef] = &[
    CommandDef {
        name: "about",
        aliases: &[],
        description: "Show profile, skills and experience",
    },
    CommandDef {
        name: "projects",
        aliases: &["proj"],
        description: "Show the project showcase",
    },
    CommandDef {
        name: "project",
        aliases: &[],
        description: "Open a project by id (e.g. :project ecommerce)",
    },
    CommandDef {
        name: "activity",
        aliases: &["act"],
        description: "Show recent GitHub activity",
    },
    CommandDef {
        name: "reviews",
        aliases: &["rev"],
        description: "Show client reviews",
    },
    CommandDef {
        name: "services",
        aliases: &["svc"],
        description: "Show offered services",
    },
    CommandDef {
        name: "team",
        aliases: &[],
        description: "Show team members",
    },
    CommandDef {
        name: "dashboard",
        aliases: &["dash"],
        description: "Show your projects, meetings and messages",
    },
    CommandDef {
        name: "user",
        aliases: &["gh"],
        description: "Show activity for another handle (e.g. :user octocat)",
    },
    CommandDef {
        name: "limit",
        aliases: &[],
        description: "Number of activity items (e.g. :limit 10)",
    },
    CommandDef {
        name: "signout",
        aliases: &["logout"],
        description: "Forget the current session",
    },
    CommandDef {
        name: "quit",
        aliases: &["q"],
        description: "Quit folio",
    },
    CommandDef {
        name: "help",
        aliases: &["h"],
        description: "Show help",
    },
];

pub fn matching_commands(input: &str) -> Vec<&'static CommandDef> {
    let input_lower = input.to_lowercase();
    COMMANDS
        .iter()
        .filter(|cmd| {
            cmd.name.starts_with(&input_lower)
                || cmd.aliases.iter().any(|a| a.starts_with(&input_lower))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_commands() {
        assert_eq!(matching_commands("a").len(), 2); // about + activity
        assert_eq!(matching_commands("act")[0].name, "activity");

        assert_eq!(matching_commands("s").len(), 2); // services + signout
        assert_eq!(matching_commands("sig").len(), 1);
        assert_eq!(matching_commands("sig")[0].name, "signout");

        assert_eq!(matching_commands("proj").len(), 2); // projects + project
        assert_eq!(matching_commands("proj")[0].name, "projects");

        assert_eq!(matching_commands("dash")[0].name, "dashboard");
        assert_eq!(matching_commands("gh")[0].name, "user");

        assert_eq!(matching_commands("q").len(), 1);
        assert_eq!(matching_commands("q")[0].name, "quit");

        assert!(matching_commands("xyz").is_empty());
    }
}
