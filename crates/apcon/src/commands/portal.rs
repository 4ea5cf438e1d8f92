//! Portal profile command handlers.

use tabled::Tabled;

use apcon_core::{Console, PortalProfile};

use crate::cli::{GlobalOpts, PortalArgs, PortalCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "UAM Server")]
    uam_server: String,
    #[tabled(rename = "RADIUS")]
    radius: String,
}

impl From<&PortalProfile> for ProfileRow {
    fn from(p: &PortalProfile) -> Self {
        let radius = match (p.radius_server.as_deref(), p.radius_port.as_deref()) {
            (Some(server), Some(port)) => format!("{server}:{port}"),
            (Some(server), None) => server.to_owned(),
            _ => String::new(),
        };
        Self {
            name: p.name.clone(),
            uam_server: p.uam_server.clone().unwrap_or_default(),
            radius,
        }
    }
}

pub async fn handle(
    console: &Console,
    args: PortalArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PortalCommand::Profiles => {
            let profiles = console.portal_profiles().await?;
            let out = output::render_list(
                &global.output,
                &profiles,
                |p| ProfileRow::from(p),
                |p| p.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
