use ecogrid_core::{Aggregator, CertificateId};

use super::CommandResult;
use crate::cli::CertifyArgs;
use crate::error::CliError;

pub async fn run(args: &CertifyArgs, aggregator: &Aggregator) -> Result<CommandResult, CliError> {
    let certificate_id = CertificateId::parse(&args.id)?;

    let record = aggregator
        .verify_certification(&certificate_id, &args.issuer)
        .await;
    Ok(CommandResult::ok(serde_json::to_value(record)?))
}
