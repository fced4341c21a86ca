pub mod client;

mod run;

#[derive(Debug)]
pub enum Action {
    Client(client::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
