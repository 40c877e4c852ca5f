use std::collections::HashMap;
use std::env;
use std::result::Result;

use tokio::runtime::Builder;

use ecommerce_common::config::{AppCfgHardLimit, AppCfgInitArgs, AppConfig};
use ecommerce_common::constant::env_vars::EXPECTED_LABELS;
use ecommerce_common::logging::{app_log_event, AppLogLevel};

use storefront::constant::hard_limit;
use storefront::model::SessionContext;
use storefront::AppClientContext;

struct ProbeArgs {
    path: String,
    session: SessionContext,
    recommend: bool,
}

// usage: probe <path> [token] [role] [--recommend]
fn parse_args() -> Result<ProbeArgs, ()> {
    let mut recommend = false;
    let mut positional = Vec::new();
    for a in env::args().skip(1) {
        if a.as_str() == "--recommend" {
            recommend = true;
        } else {
            positional.push(a);
        }
    }
    let mut iter = positional.into_iter();
    let path = iter.next().ok_or_else(|| {
        println!("[ERROR] usage: probe <path> [token] [role] [--recommend]");
    })?;
    let session = SessionContext::new(iter.next(), iter.next());
    Ok(ProbeArgs {
        path,
        session,
        recommend,
    })
}

fn init_config() -> Result<AppConfig, ()> {
    let iter = env::vars().filter(|(k, _v)| EXPECTED_LABELS.contains(&k.as_str()));
    let env_var_map = HashMap::from_iter(iter);
    let limit = AppCfgHardLimit {
        max_timeout_secs: hard_limit::MAX_SECONDS_REQUEST_TIMEOUT,
    };
    let args = AppCfgInitArgs { env_var_map, limit };
    AppConfig::new(args).map_err(|e| {
        println!(
            "[ERROR] config failure, code:{:?}, detail:{:?}",
            e.code, e.detail
        );
    })
}

async fn fetch_recommend(ctx: &AppClientContext) -> Result<(), ()> {
    let logctx = ctx.log_context();
    let resp = ctx
        .api()
        .recommend()
        .get_everyday_recommend()
        .await
        .map_err(|e| {
            app_log_event!(logctx, AppLogLevel::ERROR, "{e}");
        })?;
    println!("[recommend] status:{}, body:{}", resp.status, resp.text());
    Ok(())
}

fn main() -> Result<(), ()> {
    let args = parse_args()?;
    let cfg = init_config()?;
    let ctx = AppClientContext::new(cfg).map_err(|e| {
        println!("[ERROR] client context init failure, {e}");
    })?;
    let logctx = ctx.log_context();
    let outcome = ctx
        .navigator()
        .navigate(args.path.as_str(), &args.session)
        .map_err(|e| {
            app_log_event!(logctx, AppLogLevel::ERROR, "{e}");
        })?;
    println!(
        "[navigate] requested:{}, landed:{}, view:{:?}, decision:{:?}, title:{:?}, params:{:?}",
        outcome.requested,
        outcome.landed.path,
        outcome.landed.view(),
        outcome.decision,
        outcome.title,
        outcome.landed.params
    );
    if !args.recommend {
        return Ok(());
    }
    let runtime = Builder::new_current_thread()
        .thread_name("storefront-probe")
        .enable_time()
        .enable_io()
        .build()
        .map_err(|e| {
            app_log_event!(logctx, AppLogLevel::ERROR, "{:?}", e);
        })?;
    runtime.block_on(fetch_recommend(&ctx))
} // end of fn main
