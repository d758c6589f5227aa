use super::common::ConfigArgs;
use artifact_rank::Result;
use artifact_rank::license::check;
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct LicenseArgs {
    /// License declared by the artifact (an SPDX id or free text)
    #[arg(value_name = "LICENSE")]
    pub license: String,

    /// License of the project that would use the artifact [default: the configured `license_target`]
    #[arg(long, value_name = "LICENSE")]
    pub target: Option<String>,

    /// Intended use of the artifact [default: the configured `license_use_case`]
    #[arg(long, value_name = "USE")]
    pub use_case: Option<String>,

    /// Print the decision as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn check_license(args: &LicenseArgs) -> Result<()> {
    let config = args.config.load()?;

    let target = args.target.as_deref().unwrap_or(&config.license_target);
    let use_case = args.use_case.as_deref().unwrap_or(&config.license_use_case);
    let decision = check(Some(args.license.as_str()), Some(target), use_case);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&decision).into_app_err("serializing the license decision to JSON")?
        );
        return Ok(());
    }

    println!("Artifact license : {}", decision.model_license);
    println!("Target license   : {}", decision.target_license);
    println!("Compatible       : {}", if decision.compatible { "yes" } else { "no" });
    println!("Reason           : {}", decision.reason);
    for restriction in &decision.restrictions {
        println!("Restriction      : {restriction}");
    }

    Ok(())
}
