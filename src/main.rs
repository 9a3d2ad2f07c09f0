use anyhow::Result;
use attendance_report::utils::logging;
use attendance_report::{App, Config, RunOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let outcome = App::initialize(config).await?.run().await?;

    // 报告输出到 stdout，方便直接复制
    if let RunOutcome::Report { report, .. } = outcome {
        println!("{}", report);
    }

    Ok(())
}
