use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, LoaderTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        parse_enum,
        sales::{CreateSaleRequest, SaleList, SaleWithRelations, UpdateSaleRequest},
    },
    entity::{
        cash_registers::{
            CashRegisterStatus, Entity as CashRegisters, Model as CashRegisterModel,
        },
        sales::{
            ActiveModel, Column, Entity as Sales, Model as SaleModel, PaymentMethod, SaleItems,
            SaleStatus,
        },
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    models::{CashRegisterSummary, Sale, UserSummary},
    response::{ApiResponse, Deleted, Meta},
    routes::params::{DateBound, SaleListQuery},
    services::register_balance::{SaleState, apply_balance_delta, balance_delta},
    state::AppState,
};

pub async fn list_sales(
    state: &AppState,
    query: SaleListQuery,
) -> AppResult<ApiResponse<SaleList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(raw) = query.status.as_deref().filter(|s| !s.trim().is_empty()) {
        let status: SaleStatus = parse_enum("status", raw)?;
        condition = condition.add(Column::Status.eq(status));
    }
    if let Some(user_id) = query.user_id {
        condition = condition.add(Column::UserId.eq(user_id));
    }
    if let Some(cash_register_id) = query.cash_register_id {
        condition = condition.add(Column::CashRegisterId.eq(cash_register_id));
    }
    if let Some(raw) = query.payment_method.as_deref().filter(|s| !s.trim().is_empty()) {
        let method: PaymentMethod = parse_enum("paymentMethod", raw)?;
        condition = condition.add(Column::PaymentMethod.eq(method));
    }
    for bound in query.date_bounds()? {
        condition = match bound {
            DateBound::From(at) => condition.add(Column::CreatedAt.gte(at)),
            DateBound::Through(at) => condition.add(Column::CreatedAt.lte(at)),
            DateBound::Before(at) => condition.add(Column::CreatedAt.lt(at)),
        };
    }

    let finder = Sales::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let sales = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let users = sales.load_one(Users, &state.orm).await?;
    let registers = sales.load_one(CashRegisters, &state.orm).await?;

    let items = sales
        .into_iter()
        .zip(users)
        .zip(registers)
        .map(|((sale, user), register)| SaleWithRelations {
            sale: Sale::from(sale),
            user: user.map(UserSummary::from),
            cash_register: register.map(CashRegisterSummary::from),
        })
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Sales", SaleList { items }, Some(meta)))
}

pub async fn get_sale(state: &AppState, id: Uuid) -> AppResult<ApiResponse<SaleWithRelations>> {
    let sale = Sales::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Sale"))?;

    let data = with_relations(&state.orm, sale).await?;
    Ok(ApiResponse::success("Sale", data, Some(Meta::empty())))
}

pub async fn create_sale(
    state: &AppState,
    payload: CreateSaleRequest,
) -> AppResult<ApiResponse<SaleWithRelations>> {
    let new_sale = payload.validate()?;

    let txn = state.orm.begin().await?;

    Users::find_by_id(new_sale.user_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let register = lock_register(&txn, new_sale.cash_register_id).await?;
    ensure_open(&register, "Cash register must be open to record sales")?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        cash_register_id: Set(register.id),
        user_id: Set(new_sale.user_id),
        items: Set(SaleItems(new_sale.items)),
        total: Set(new_sale.total),
        payment_method: Set(new_sale.payment_method),
        status: Set(new_sale.status),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let sale = active.insert(&txn).await?;

    let delta = balance_delta(None, Some(SaleState::from(&sale)));
    apply_balance_delta(&txn, register.id, delta).await?;

    let data = with_relations(&txn, sale).await?;
    txn.commit().await?;

    audit::record(
        state.pool(),
        Some(data.sale.user_id),
        "sale_create",
        "sales",
        serde_json::json!({
            "sale_id": data.sale.id,
            "cash_register_id": data.sale.cash_register_id,
            "status": data.sale.status,
            "balance_delta": delta,
        }),
    )
    .await;

    Ok(ApiResponse::success("Sale created", data, Some(Meta::empty())))
}

pub async fn update_sale(
    state: &AppState,
    id: Uuid,
    payload: UpdateSaleRequest,
) -> AppResult<ApiResponse<SaleWithRelations>> {
    let changes = payload.validate()?;

    let txn = state.orm.begin().await?;

    let existing = lock_sale(&txn, id).await?;
    let register = lock_register(&txn, existing.cash_register_id).await?;
    ensure_open(&register, "Sales of a closed cash register cannot be modified")?;

    let before = SaleState::from(&existing);

    let mut active: ActiveModel = existing.into();
    if let Some(items) = changes.items {
        active.items = Set(SaleItems(items));
    }
    if let Some(total) = changes.total {
        active.total = Set(total);
    }
    if let Some(method) = changes.payment_method {
        active.payment_method = Set(method);
    }
    if let Some(status) = changes.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now().into());

    let sale = active.update(&txn).await?;

    let delta = balance_delta(Some(before), Some(SaleState::from(&sale)));
    apply_balance_delta(&txn, register.id, delta).await?;

    let data = with_relations(&txn, sale).await?;
    txn.commit().await?;

    audit::record(
        state.pool(),
        Some(data.sale.user_id),
        "sale_update",
        "sales",
        serde_json::json!({
            "sale_id": data.sale.id,
            "old_status": before.status,
            "status": data.sale.status,
            "balance_delta": delta,
        }),
    )
    .await;

    Ok(ApiResponse::success("Updated", data, Some(Meta::empty())))
}

pub async fn delete_sale(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Deleted>> {
    let txn = state.orm.begin().await?;

    let existing = lock_sale(&txn, id).await?;
    let register = lock_register(&txn, existing.cash_register_id).await?;
    ensure_open(&register, "Sales of a closed cash register cannot be deleted")?;

    let delta = balance_delta(Some(SaleState::from(&existing)), None);
    apply_balance_delta(&txn, register.id, delta).await?;

    let user_id = existing.user_id;
    existing.delete(&txn).await?;

    txn.commit().await?;

    audit::record(
        state.pool(),
        Some(user_id),
        "sale_delete",
        "sales",
        serde_json::json!({
            "sale_id": id,
            "cash_register_id": register.id,
            "balance_delta": delta,
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Sale deleted",
        Deleted { id },
        Some(Meta::empty()),
    ))
}

async fn lock_sale<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<SaleModel> {
    Sales::find_by_id(id)
        .lock(LockType::Update)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound("Sale"))
}

async fn lock_register<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<CashRegisterModel> {
    CashRegisters::find_by_id(id)
        .lock(LockType::Update)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound("Cash register"))
}

fn ensure_open(register: &CashRegisterModel, message: &str) -> AppResult<()> {
    if register.status != CashRegisterStatus::Open {
        return Err(AppError::Conflict(message.into()));
    }
    Ok(())
}

async fn with_relations<C: ConnectionTrait>(
    conn: &C,
    sale: SaleModel,
) -> AppResult<SaleWithRelations> {
    let user = sale.find_related(Users).one(conn).await?;
    let register = sale.find_related(CashRegisters).one(conn).await?;
    Ok(SaleWithRelations {
        sale: Sale::from(sale),
        user: user.map(UserSummary::from),
        cash_register: register.map(CashRegisterSummary::from),
    })
}
