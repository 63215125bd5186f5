use colored::Colorize;
use nimbus_cloud_aws::Ec2;

pub async fn handle(ec2: &Ec2, unattached: bool) -> anyhow::Result<()> {
    println!("{}", format!("Listing elastic IPs in {}...", ec2.region()).blue());

    let addresses = ec2.elastic_ips(unattached).await?;

    println!();
    if addresses.is_empty() {
        println!("{}", "No elastic IPs".dimmed());
        return Ok(());
    }

    println!("{}", format!("{:<18} {:<28}", "PUBLIC IP", "ALLOCATION ID").bold());
    println!("{}", "─".repeat(46).dimmed());

    for address in &addresses {
        println!(
            "{:<18} {:<28}",
            address.public_ip.cyan(),
            address.allocation_id
        );
    }

    Ok(())
}
