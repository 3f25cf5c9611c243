//! End-to-end workflows of the data layer against a scripted transport.

use std::sync::Arc;

use asset_console::DataContext;
use asset_console::domain::ports::CredentialStore;
use asset_console::domain::{
    AssetCheckinInput, AssetCheckoutInput, AssetCreateInput, AssetStatus, CategoryCreateInput,
    CategoryPatch, DepartmentCreateInput, DepartmentPatch, Endpoint, Error, ErrorCode,
    ManufacturerCreateInput, ManufacturerPatch, ModelCreateInput, ModelPatch, ProfileUpdateInput,
    QueryOptions, RecordId, RecordPatch, SupplierCreateInput, SupplierPatch, UserCreateInput,
    UserInfo, UserPatch,
};
use asset_console::outbound::{FileCredentialStore, InMemoryCredentialStore};
use asset_console::routes::{ASSETS_PATH, LOGIN_PATH};
use asset_console::test_support::{
    Method, RecordingNavigator, RecordingNotifier, ScriptedTransport, temp_token_path,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct Harness {
    transport: Arc<ScriptedTransport>,
    notifier: Arc<RecordingNotifier>,
    navigator: Arc<RecordingNavigator>,
    context: DataContext,
}

fn harness_with(credentials: Arc<dyn CredentialStore>) -> Harness {
    let transport = Arc::new(ScriptedTransport::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let context = DataContext::new(
        Arc::clone(&transport) as _,
        credentials,
        Arc::clone(&notifier) as _,
        Arc::clone(&navigator) as _,
    );
    Harness {
        transport,
        notifier,
        navigator,
        context,
    }
}

#[fixture]
fn harness() -> Harness {
    harness_with(Arc::new(InMemoryCredentialStore::default()))
}

fn asset(id: i64, name: &str) -> Value {
    json!({"id": id, "name": name, "tag": format!("T-{id}"), "status": "AVAILABLE"})
}

#[rstest]
#[tokio::test]
async fn creating_an_asset_refreshes_the_asset_list(harness: Harness) {
    harness
        .transport
        .once(Method::Get, "assets", Ok(json!([asset(1, "Laptop")])));
    harness.transport.once(
        Method::Get,
        "assets",
        Ok(json!([asset(1, "Laptop"), asset(2, "Monitor")])),
    );
    harness
        .transport
        .always(Method::Post, "assets", Ok(json!({"data": asset(2, "Monitor")})));

    let list = harness.context.assets_query(QueryOptions::default());
    assert_eq!(list.fetch().await.records.len(), 1);

    let created = harness
        .context
        .create_asset_mutation()
        .trigger(AssetCreateInput {
            name: "Monitor".to_owned(),
            tag: "T-2".to_owned(),
            serial_number: "SN-2".to_owned(),
            description: String::new(),
            status: AssetStatus::Available,
            model_id: RecordId::from(3_i64),
        })
        .await
        .expect("create succeeds");
    assert_eq!(created.id, RecordId::from(2_i64));

    let refreshed = list.fetch().await;
    assert_eq!(refreshed.records.len(), 2);
    assert_eq!(harness.transport.call_count(Method::Get, "assets"), 2);
    assert_eq!(harness.notifier.messages(), vec!["Created successfully"]);
    assert_eq!(harness.navigator.visits(), vec![ASSETS_PATH]);
}

#[rstest]
#[tokio::test]
async fn reads_are_empty_and_loading_before_the_first_response(harness: Harness) {
    let list = harness.context.assets_query(QueryOptions::default());
    let page = harness.context.categories_query(QueryOptions::page(1, 10));
    let detail = harness.context.asset_query(4_i64);

    let list_state = list.state();
    assert!(list_state.records.is_empty());
    assert!(list_state.loading);
    assert!(list_state.error.is_none());

    let page_state = page.state();
    assert!(page_state.records.is_empty());
    assert!(page_state.paginator_info.is_none());
    assert!(page_state.loading);

    assert!(detail.state().loading);
    assert!(harness.transport.calls().is_empty());
}

#[rstest]
#[tokio::test]
async fn paginated_reads_expose_a_consistent_summary(harness: Harness) {
    harness.transport.always(
        Method::Get,
        "categories",
        Ok(json!({
            "limit": 2,
            "page": 2,
            "sort": "",
            "total_rows": 5,
            "total_pages": 3,
            "rows": [{"id": 3, "name": "Chairs"}, {"id": 4, "name": "Desks"}]
        })),
    );

    let state = harness
        .context
        .categories_query(QueryOptions::page(2, 2))
        .fetch()
        .await;

    let info = state.paginator_info.expect("page summary");
    assert_eq!(state.records.len(), 2);
    assert_eq!((info.from, info.to), (3, 4));
    assert_eq!(info.last_page, 3);
    assert!(info.has_more_pages);

    let calls = harness.transport.calls();
    let params = &calls.first().expect("one request").params;
    assert!(params.contains(&("searchJoin".to_owned(), "and".to_owned())));
    assert!(params.contains(&("page".to_owned(), "2".to_owned())));
}

#[rstest]
#[tokio::test]
async fn inconsistent_pages_surface_as_shape_errors(harness: Harness) {
    harness.transport.always(
        Method::Get,
        "categories",
        Ok(json!({
            "limit": 2,
            "page": 1,
            "total_rows": 5,
            "total_pages": 9,
            "rows": []
        })),
    );

    let state = harness
        .context
        .categories_query(QueryOptions::page(1, 2))
        .fetch()
        .await;

    let error = state.error.expect("shape error");
    assert_eq!(error.code(), ErrorCode::UnexpectedShape);
    assert!(!state.loading);
    assert!(state.records.is_empty());
}

#[rstest]
#[tokio::test]
async fn profile_updates_merge_the_reloaded_user_into_the_session(harness: Harness) {
    harness.context.session().set_user_info(
        serde_json::from_value::<UserInfo>(json!({
            "id": 1,
            "username": "ada",
            "avatar": "ada.png"
        }))
        .expect("user info decodes"),
    );
    harness.transport.always(Method::Patch, "profile", Ok(Value::Null));
    harness.transport.always(
        Method::Get,
        "me",
        Ok(json!({"data": {"id": 1, "username": "ada.l", "email": "ada@example.com"}})),
    );

    harness
        .context
        .update_profile_mutation()
        .trigger(ProfileUpdateInput {
            username: "ada.l".to_owned(),
            email: "ada@example.com".to_owned(),
        })
        .await
        .expect("profile update succeeds");

    let session = harness.context.session().current();
    let user = session.user.as_ref().expect("still signed in");
    assert_eq!(user.username(), "ada.l");
    assert_eq!(user.email(), "ada@example.com");
    assert_eq!(user.avatar(), "ada.png");
    assert_eq!(harness.transport.call_count(Method::Get, "me"), 1);
    assert_eq!(harness.notifier.messages(), vec!["Updated successfully"]);
}

#[rstest]
#[tokio::test]
async fn logout_forgets_the_token_cache_and_user() {
    let (_dir, path) = temp_token_path().expect("temp dir");
    let store = Arc::new(FileCredentialStore::open(&path).expect("open store"));
    store.store("tok-1").expect("store token");
    let harness = harness_with(Arc::clone(&store) as _);
    harness
        .transport
        .always(Method::Get, "assets", Ok(json!([asset(1, "Laptop")])));
    harness.context.session().set_user_info(UserInfo {
        username: Some("ada".to_owned()),
        ..UserInfo::default()
    });
    let list = harness.context.assets_query(QueryOptions::default());
    list.fetch().await;

    harness.context.session().logout().expect("logout succeeds");

    assert_eq!(store.load().expect("load token"), None);
    assert!(!harness.context.session().current().is_signed_in());
    assert!(list.state().loading);
    assert_eq!(harness.navigator.visits().last().map(String::as_str), Some(LOGIN_PATH));
}

#[rstest]
#[tokio::test]
async fn checkout_notifies_and_refetches_assets(harness: Harness) {
    harness
        .transport
        .once(Method::Get, "assets", Ok(json!([asset(7, "Laptop")])));
    harness.transport.once(
        Method::Get,
        "assets",
        Ok(json!([{"id": 7, "name": "Laptop", "status": "ASSIGNED"}])),
    );
    harness
        .transport
        .always(Method::Post, "assets/7/checkout", Ok(json!({"ok": true})));

    let list = harness.context.assets_query(QueryOptions::default());
    list.fetch().await;

    let ack = harness
        .context
        .checkout_asset_mutation()
        .trigger(AssetCheckoutInput {
            asset_name: "Laptop".to_owned(),
            asset_id: 7,
            user_id: 2,
            checkout_date: "2024-05-01".to_owned(),
            expected_checkin_date: None,
            notes: String::new(),
        })
        .await
        .expect("checkout succeeds");
    assert_eq!(ack, json!({"ok": true}));

    let refreshed = list.fetch().await;
    let status = refreshed.records.first().and_then(|asset| asset.status);
    assert_eq!(status, Some(AssetStatus::Assigned));
    assert_eq!(harness.notifier.messages(), vec!["Checkout successfully"]);

    let body = harness
        .transport
        .calls()
        .into_iter()
        .find(|call| call.method == Method::Post)
        .and_then(|call| call.body)
        .expect("checkout body");
    assert_eq!(body["assetId"], json!(7));
    assert_eq!(body["expectedCheckinDate"], Value::Null);
}

#[rstest]
#[tokio::test]
async fn failed_writes_leave_the_cache_alone(harness: Harness) {
    harness
        .transport
        .always(Method::Get, "assets", Ok(json!([asset(1, "Laptop")])));
    harness.transport.always(
        Method::Post,
        "assets",
        Err(Error::from_status(422, "tag already taken")),
    );

    let list = harness.context.assets_query(QueryOptions::default());
    list.fetch().await;
    let mutation = harness.context.create_asset_mutation();

    let error = mutation
        .trigger(AssetCreateInput {
            name: "Dup".to_owned(),
            tag: "T-1".to_owned(),
            serial_number: String::new(),
            description: String::new(),
            status: AssetStatus::Pending,
            model_id: RecordId::from(3_i64),
        })
        .await
        .expect_err("create fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(mutation.last_error(), Some(error));
    assert!(harness.notifier.messages().is_empty());
    assert!(harness.navigator.visits().is_empty());
    list.fetch().await;
    assert_eq!(harness.transport.call_count(Method::Get, "assets"), 1);
}

#[derive(Debug, Clone, Copy)]
enum Write {
    Create,
    Update,
    Delete,
}

fn row(id: i64) -> Value {
    json!({"id": id, "name": format!("row {id}"), "username": format!("user{id}")})
}

fn listing(endpoint: Endpoint, ids: &[i64]) -> Value {
    let rows: Vec<Value> = ids.iter().copied().map(row).collect();
    if endpoint == Endpoint::Categories {
        let total = u64::try_from(rows.len()).expect("small page");
        json!({
            "limit": 10,
            "page": 1,
            "total_rows": total,
            "total_pages": 1,
            "rows": rows
        })
    } else {
        Value::Array(rows)
    }
}

async fn read_count(context: &DataContext, endpoint: Endpoint) -> usize {
    let options = QueryOptions::default();
    match endpoint {
        Endpoint::Categories => {
            let page = context.categories_query(QueryOptions::page(1, 10)).fetch().await;
            page.records.len()
        }
        Endpoint::Departments => context.departments_query(options).fetch().await.records.len(),
        Endpoint::Manufacturers => {
            context.manufacturers_query(options).fetch().await.records.len()
        }
        Endpoint::Models => context.models_query(options).fetch().await.records.len(),
        Endpoint::Suppliers => context.suppliers_query(options).fetch().await.records.len(),
        Endpoint::Users => context.users_query(options).fetch().await.records.len(),
        other => panic!("no list read wired for {other}"),
    }
}

macro_rules! run_write {
    ($context:expr, $write:expr, $create:ident($input:expr), $update:ident, $delete:ident, $patch:ty) => {
        match $write {
            Write::Create => $context.$create().trigger($input).await.map(drop),
            Write::Update => $context
                .$update()
                .trigger(RecordPatch::new(1_i64, <$patch>::default()))
                .await
                .map(drop),
            Write::Delete => $context.$delete().trigger(RecordId::from(1_i64)).await,
        }
    };
}

async fn perform(context: &DataContext, endpoint: Endpoint, write: Write) -> Result<(), Error> {
    match endpoint {
        Endpoint::Categories => run_write!(
            context,
            write,
            create_category_mutation(CategoryCreateInput {
                name: "Chairs".to_owned(),
                description: None,
            }),
            update_category_mutation,
            delete_category_mutation,
            CategoryPatch
        ),
        Endpoint::Departments => run_write!(
            context,
            write,
            create_department_mutation(DepartmentCreateInput {
                name: "Finance".to_owned(),
                notes: String::new(),
            }),
            update_department_mutation,
            delete_department_mutation,
            DepartmentPatch
        ),
        Endpoint::Manufacturers => run_write!(
            context,
            write,
            create_manufacturer_mutation(ManufacturerCreateInput {
                name: "Lenovo".to_owned(),
                email: "support@example.com".to_owned(),
            }),
            update_manufacturer_mutation,
            delete_manufacturer_mutation,
            ManufacturerPatch
        ),
        Endpoint::Models => run_write!(
            context,
            write,
            create_model_mutation(ModelCreateInput {
                name: "X1".to_owned(),
                category_id: RecordId::from(1_i64),
                manufacturer_id: RecordId::from(1_i64),
                model_number: "20XW".to_owned(),
            }),
            update_model_mutation,
            delete_model_mutation,
            ModelPatch
        ),
        Endpoint::Suppliers => run_write!(
            context,
            write,
            create_supplier_mutation(SupplierCreateInput {
                name: "Acme".to_owned(),
            }),
            update_supplier_mutation,
            delete_supplier_mutation,
            SupplierPatch
        ),
        Endpoint::Users => run_write!(
            context,
            write,
            create_user_mutation(UserCreateInput {
                username: "grace".to_owned(),
                email: None,
            }),
            update_user_mutation,
            delete_user_mutation,
            UserPatch
        ),
        other => panic!("no writes wired for {other}"),
    }
}

#[rstest]
#[tokio::test]
async fn writes_refresh_their_own_resource_and_leave_others_cached(
    harness: Harness,
    #[values(
        Endpoint::Categories,
        Endpoint::Departments,
        Endpoint::Manufacturers,
        Endpoint::Models,
        Endpoint::Suppliers,
        Endpoint::Users
    )]
    endpoint: Endpoint,
    #[values(Write::Create, Write::Update, Write::Delete)] write: Write,
) {
    let path = endpoint.path();
    let record_path = endpoint.record_path(1);
    harness
        .transport
        .once(Method::Get, path, Ok(listing(endpoint, &[1])));
    harness
        .transport
        .once(Method::Get, path, Ok(listing(endpoint, &[1, 2])));
    harness.transport.always(Method::Post, path, Ok(row(2)));
    harness
        .transport
        .always(Method::Patch, &record_path, Ok(row(1)));
    harness
        .transport
        .always(Method::Delete, &record_path, Ok(Value::Null));
    harness
        .transport
        .always(Method::Get, "assets", Ok(json!([asset(1, "Laptop")])));
    let assets = harness.context.assets_query(QueryOptions::default());
    assets.fetch().await;

    assert_eq!(read_count(&harness.context, endpoint).await, 1);
    perform(&harness.context, endpoint, write)
        .await
        .expect("write succeeds");
    assert_eq!(read_count(&harness.context, endpoint).await, 2);
    assets.fetch().await;

    assert_eq!(harness.transport.call_count(Method::Get, path), 2);
    assert_eq!(harness.transport.call_count(Method::Get, "assets"), 1);
    assert_eq!(harness.notifier.messages().len(), 1);
}

#[rstest]
#[tokio::test]
async fn checkin_notifies_and_refetches_assets(harness: Harness) {
    harness.transport.once(
        Method::Get,
        "assets",
        Ok(json!([{"id": 7, "name": "Laptop", "status": "ASSIGNED"}])),
    );
    harness
        .transport
        .once(Method::Get, "assets", Ok(json!([asset(7, "Laptop")])));
    harness
        .transport
        .always(Method::Post, "assets/7/checkin", Ok(json!({"ok": true})));

    let list = harness.context.assets_query(QueryOptions::default());
    list.fetch().await;

    harness
        .context
        .checkin_asset_mutation()
        .trigger(AssetCheckinInput {
            asset_name: "Laptop".to_owned(),
            asset_id: 7,
            checkin_date: "2024-05-09".to_owned(),
            status: AssetStatus::Available,
            notes: "returned in good order".to_owned(),
        })
        .await
        .expect("checkin succeeds");

    let refreshed = list.fetch().await;
    let status = refreshed.records.first().and_then(|asset| asset.status);
    assert_eq!(status, Some(AssetStatus::Available));
    assert_eq!(harness.notifier.messages(), vec!["Checkin successfully"]);
    assert_eq!(harness.transport.call_count(Method::Get, "assets"), 2);

    let body = harness
        .transport
        .calls()
        .into_iter()
        .find(|call| call.method == Method::Post)
        .and_then(|call| call.body)
        .expect("checkin body");
    assert_eq!(body["assetId"], json!(7));
    assert_eq!(body["status"], json!("AVAILABLE"));
}
