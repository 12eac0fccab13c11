//! TicTacToe APIサーバーのエントリポイント
//! 設定読み込み、セッションマネージャー初期化、HTTPサーバー起動を行う。

use std::sync::Arc;

use tokio::net::TcpListener;
use TicTacToe::{
    api::{handlers::AppState, routes::create_router},
    config::Config,
    session::GameSessionManager,
};

/// メイン関数 - サーバーの初期化と起動を担当
#[tokio::main]
async fn main() {
    // 設定ファイルと環境変数から統合設定を読み込み
    let config = Config::load();
    if let Err(e) = config.validate() {
        eprintln!("設定エラー: {}", e);
        std::process::exit(1);
    }

    println!("設定読み込み完了:");
    println!("  サーバー: {}:{}", config.server.host, config.server.port);
    println!("  最大セッション数: {}", config.session.max_sessions);
    println!(
        "  セッションタイムアウト: {}分",
        config.session.session_timeout_minutes
    );

    let session_manager = Arc::new(GameSessionManager::with_timeout(
        config.session.max_sessions,
        config.session.session_timeout_minutes,
    ));

    // タイムアウトしたセッションを定期的に回収する
    if config.session.enable_session_cleanup {
        let cleanup_manager = Arc::clone(&session_manager);
        let interval_minutes = config.session.cleanup_interval_minutes;
        tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(std::time::Duration::from_secs(interval_minutes * 60));
            loop {
                ticker.tick().await;
                let removed = cleanup_manager.cleanup_inactive_sessions().await;
                if removed > 0 {
                    println!("非アクティブセッションを削除: {}件", removed);
                }
            }
        });
    }

    let state = AppState::new_with_manager(session_manager);
    let app = create_router().with_state(state);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_address).await.unwrap_or_else(|e| {
        eprintln!("アドレスバインド失敗 {}: {}", bind_address, e);
        std::process::exit(1);
    });

    println!("TicTacToe APIサーバー開始: {}", bind_address);
    println!("サーバー稼働中 (Ctrl+C で停止)");

    // Axumサーバーを開始し、リクエストの処理を開始
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
