//! Slash command definition and option extraction for `settings`.

use serenity::all::{
    CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption, Permissions,
    ResolvedValue,
};

use crate::model::settings::{
    CommandUser, SettingsOptions, OPTION_INTERVAL, OPTION_USER_ADD, OPTION_USER_REMOVE,
    SETTINGS_COMMAND_NAME,
};

/// Builds the `settings` command registered for the configured guild.
///
/// All three options are optional. `interval` deliberately declares no minimum so a
/// non-positive value reaches the handler and gets the invalid-value reply.
pub fn settings_command() -> CreateCommand {
    CreateCommand::new(SETTINGS_COMMAND_NAME)
        .description("Adjust bot settings")
        .default_member_permissions(Permissions::MANAGE_GUILD)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                OPTION_INTERVAL,
                "Check interval (in milliseconds)",
            )
            .required(false),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::User,
                OPTION_USER_ADD,
                "Add a user to the exclusion list",
            )
            .required(false),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::User,
                OPTION_USER_REMOVE,
                "Remove a user from the exclusion list",
            )
            .required(false),
        )
}

/// Pulls the `settings` arguments out of a command interaction.
///
/// Unknown options and options of an unexpected type are ignored.
pub fn settings_options(command: &CommandInteraction) -> SettingsOptions {
    let mut options = SettingsOptions::default();

    for option in command.data.options() {
        match (option.name, option.value) {
            (OPTION_INTERVAL, ResolvedValue::Integer(ms)) => options.interval = Some(ms),
            (OPTION_USER_ADD, ResolvedValue::User(user, _)) => {
                options.user_add = Some(CommandUser::from(user))
            }
            (OPTION_USER_REMOVE, ResolvedValue::User(user, _)) => {
                options.user_remove = Some(CommandUser::from(user))
            }
            _ => {}
        }
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the registered command shape.
    ///
    /// Expected: name "settings" with one integer and two user options, none required
    #[test]
    fn defines_settings_command_options() {
        let json = serde_json::to_value(settings_command()).unwrap();

        assert_eq!(json["name"], "settings");

        let options = json["options"].as_array().unwrap();
        let shape: Vec<(&str, u64)> = options
            .iter()
            .map(|option| {
                (
                    option["name"].as_str().unwrap(),
                    option["type"].as_u64().unwrap(),
                )
            })
            .collect();
        assert_eq!(
            shape,
            vec![("interval", 4), ("user-add", 6), ("user-remove", 6)]
        );
        assert!(options
            .iter()
            .all(|option| option["required"].as_bool() != Some(true)));
    }
}
