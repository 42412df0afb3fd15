//! AliDNS 集成测试（真实 API）
//!
//! 运行方式:
//! ```bash
//! ALIDNS_ACCESS_KEY_ID=xxx ALIDNS_ACCESS_KEY_SECRET=xxx TEST_DOMAIN=example.com \
//!     cargo test -p alidns-provider --test alidns_live_test -- --ignored --nocapture --test-threads=1
//! ```
//!
//! `ALIDNS_REGION_ID` 可选，默认 `cn-hangzhou`。

mod common;

use std::time::Duration;

use alidns_provider::{
    ProviderError, Record, RecordAppender, RecordDeleter, RecordGetter, RecordSetter, RecordType,
};
use common::{LiveContext, generate_test_record_name};

#[tokio::test]
#[ignore = "integration test: requires ALIDNS_ACCESS_KEY_ID, ALIDNS_ACCESS_KEY_SECRET and TEST_DOMAIN"]
async fn test_alidns_list_records() {
    skip_if_no_credentials!(
        "ALIDNS_ACCESS_KEY_ID",
        "ALIDNS_ACCESS_KEY_SECRET",
        "TEST_DOMAIN"
    );

    let Some(ctx) = LiveContext::from_env() else {
        return;
    };
    let records = require_ok!(
        ctx.provider.get_records(&ctx.domain).await,
        "get_records 调用失败"
    );

    for record in &records {
        assert!(
            record.name.ends_with(&ctx.domain),
            "记录名应以域名结尾: {}",
            record.name
        );
        assert!(!record.id.is_empty());
    }

    println!("✓ get_records 测试通过，共 {} 条记录", records.len());
}

#[tokio::test]
#[ignore = "integration test: requires ALIDNS_ACCESS_KEY_ID, ALIDNS_ACCESS_KEY_SECRET and TEST_DOMAIN"]
async fn test_alidns_txt_lifecycle() {
    skip_if_no_credentials!(
        "ALIDNS_ACCESS_KEY_ID",
        "ALIDNS_ACCESS_KEY_SECRET",
        "TEST_DOMAIN"
    );

    let Some(ctx) = LiveContext::from_env() else {
        return;
    };
    let name = format!("{}.{}", generate_test_record_name(), ctx.domain);

    // 1. 创建
    let created = require_ok!(
        ctx.provider
            .append_records(
                &ctx.domain,
                vec![Record::new(
                    "TXT",
                    name.as_str(),
                    "integration-test",
                    Duration::from_secs(600),
                )],
            )
            .await,
        "append_records 调用失败"
    );
    let record = created[0].clone();
    assert!(!record.id.is_empty(), "创建后应返回记录 ID");

    // 2. 列出并确认
    let listed = require_ok!(ctx.provider.get_records(&ctx.domain).await);
    let found = listed.iter().find(|r| r.id == record.id);
    assert!(found.is_some(), "新建记录应出现在列表中");
    if let Some(found) = found {
        assert_eq!(found.name, name);
        assert_eq!(found.record_type, RecordType::Txt);
        assert_eq!(found.value, "integration-test");
    }

    // 3. 更新
    let mut updated = record.clone();
    updated.value = "integration-test-updated".to_string();
    let update_result = ctx.provider.set_records(&ctx.domain, vec![updated]).await;

    // 4. 清理（无论更新是否成功）
    let delete_result = ctx.provider.delete_records(&ctx.domain, vec![record]).await;

    require_ok!(update_result, "set_records 调用失败");
    require_ok!(delete_result, "delete_records 调用失败");

    println!("✓ TXT 记录生命周期测试通过");
}

#[tokio::test]
#[ignore = "integration test: requires ALIDNS_ACCESS_KEY_ID, ALIDNS_ACCESS_KEY_SECRET and TEST_DOMAIN"]
async fn test_alidns_delete_unknown_record() {
    skip_if_no_credentials!(
        "ALIDNS_ACCESS_KEY_ID",
        "ALIDNS_ACCESS_KEY_SECRET",
        "TEST_DOMAIN"
    );

    let Some(ctx) = LiveContext::from_env() else {
        return;
    };
    let ghost = Record::new("TXT", "ghost", "x", Duration::ZERO).with_id("1");

    let result = ctx.provider.delete_records(&ctx.domain, vec![ghost]).await;

    let Err(failure) = result else {
        panic!("删除不存在的记录应失败");
    };
    assert!(failure.completed.is_empty());
    assert!(
        failure.error.is_expected(),
        "应映射为预期错误: {:?}",
        failure.error
    );
    assert!(!matches!(
        failure.error.root_cause(),
        ProviderError::Unknown { .. }
    ));

    println!("✓ 删除不存在记录的错误映射测试通过");
}
