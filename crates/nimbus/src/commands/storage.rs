use colored::Colorize;
use nimbus_cloud_aws::S3;
use std::path::Path;

pub async fn handle_get(s3: &S3, key: &str, path: &Path) -> anyhow::Result<()> {
    println!(
        "{}",
        format!("Downloading s3://{}/{}...", s3.bucket(), key).blue()
    );

    if s3.download(path, key).await? {
        println!("{} {}", "✓".green(), path.display());
        Ok(())
    } else {
        anyhow::bail!("Object s3://{}/{} could not be read", s3.bucket(), key)
    }
}

pub async fn handle_put(s3: &S3, path: &Path, key: &str) -> anyhow::Result<()> {
    println!(
        "{}",
        format!("Uploading {} to s3://{}/{}...", path.display(), s3.bucket(), key).blue()
    );

    s3.upload(path, key).await?;
    println!("{} s3://{}/{}", "✓".green(), s3.bucket(), key);

    Ok(())
}
