use judgment_harvester::browser::launch_headless_browser;
use judgment_harvester::infrastructure::JsExecutor;
use judgment_harvester::services::PageController;
use judgment_harvester::utils::logging;
use judgment_harvester::Config;

#[tokio::test]
#[ignore] // 默认忽略，需要本机安装 Chrome 且能访问网站：cargo test -- --ignored
async fn test_live_site_navigation() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 启动浏览器并导航到入口
    let (mut browser, page) = launch_headless_browser(&config.entry_url)
        .await
        .expect("启动无头浏览器失败");

    let controller = PageController::new(JsExecutor::new(page), &config);
    controller.wait_for_ready().await;

    // 年份下拉框应该有纯数字选项
    let years = controller.list_years().await.expect("读取年份下拉框失败");
    assert!(!years.is_empty(), "年份列表不应为空");

    // 第一个年份应该能列出卷
    let volumes = controller
        .list_volumes(&years[0])
        .await
        .expect("读取卷下拉框失败");
    println!("年份 {} 的卷: {:?}", years[0], volumes);

    let _ = browser.close().await;
}

#[tokio::test]
#[ignore]
async fn test_browser_launch() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 测试浏览器启动
    let result = launch_headless_browser(&config.entry_url).await;
    assert!(result.is_ok(), "应该能够成功启动无头浏览器");

    if let Ok((mut browser, _page)) = result {
        let _ = browser.close().await;
    }
}
