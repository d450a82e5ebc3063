//! Module for returning to guest browsing.

use super::*;

/// Function for the [`Commands::Signout`] in the CLI.
pub fn signout<I: UserInteraction>(interaction: &I, session: &mut Session<SqliteStore>) -> Result<()> {
  match session.identity() {
    Identity::Guest => interaction.reply(ResponseContent::Info("Already browsing as a guest")),
    Identity::User(user_id) => {
      let message = format!("Signed out {user_id}, browsing as a guest");
      session.sign_out();
      interaction.reply(ResponseContent::Success(&message))
    },
  }
}
