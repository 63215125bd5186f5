use colored::Colorize;
use nimbus_cloud_aws::Ec2;

pub async fn handle(ec2: &Ec2, interface_id: &str) -> anyhow::Result<()> {
    println!("{}", format!("Reading network interface {}...", interface_id).blue());

    let details = ec2.network_details(interface_id).await?;

    println!();
    println!("{}", format!("{:<28} {:<28}", "ASSOCIATION ID", "ALLOCATION ID").bold());
    println!("{}", "─".repeat(56).dimmed());

    for detail in details {
        println!(
            "{:<28} {:<28}",
            detail.association_id.as_deref().unwrap_or("-"),
            detail.allocation_id.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
