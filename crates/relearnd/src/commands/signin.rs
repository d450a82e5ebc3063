//! Module for the guest → identified sign-in transition.

use super::*;

#[derive(Args, Clone)]
pub struct SigninOptions {
  /// Stable user identifier to sign in as
  pub user_id: String,
}

/// Function for the [`Commands::Signin`] in the CLI.
pub async fn signin<I: UserInteraction>(
  interaction: &I,
  session: &mut Session<SqliteStore>,
  options: SigninOptions,
) -> Result<()> {
  let SigninOptions { user_id } = options;

  match session.sign_in(&user_id).await {
    MergeOutcome::NoGuestData =>
      interaction.reply(ResponseContent::Success(&format!("Signed in as {user_id}"))),
    MergeOutcome::Merged { written, guest_cleared: true } => interaction.reply(
      ResponseContent::Success(&format!("Signed in as {user_id}, merged {written} guest entries")),
    ),
    MergeOutcome::Merged { written, guest_cleared: false } => {
      interaction.reply(ResponseContent::Success(&format!(
        "Signed in as {user_id}, merged {written} guest entries"
      )))?;
      interaction.reply(ResponseContent::Info(
        "Some progress could not be written; your local history is kept and will be \
         merged again on the next sign-in",
      ))
    },
    MergeOutcome::AlreadyInProgress =>
      interaction.reply(ResponseContent::Info("A sign-in is already in progress")),
  }
}
