use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, LoaderTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        cash_registers::{
            CashRegisterList, CashRegisterWithRelations, CashRegisterWithUser,
            OpenCashRegisterRequest, UpdateCashRegisterRequest,
        },
        parse_enum,
    },
    entity::{
        cash_registers::{ActiveModel, CashRegisterStatus, Column, Entity as CashRegisters, Model},
        sales::{Column as SaleCol, Entity as Sales, Model as SaleModel},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    models::{CashRegister, SaleSummary, UserSummary},
    response::{ApiResponse, Deleted, Meta},
    routes::params::CashRegisterListQuery,
    state::AppState,
};

const ALREADY_OPEN: &str = "User already has an open cash register";

pub async fn list_cash_registers(
    state: &AppState,
    query: CashRegisterListQuery,
) -> AppResult<ApiResponse<CashRegisterList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(raw) = query.status.as_deref().filter(|s| !s.trim().is_empty()) {
        let status: CashRegisterStatus = parse_enum("status", raw)?;
        condition = condition.add(Column::Status.eq(status));
    }
    if let Some(user_id) = query.user_id {
        condition = condition.add(Column::UserId.eq(user_id));
    }

    let finder = CashRegisters::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let registers = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let users = registers.load_one(Users, &state.orm).await?;
    let sales = registers.load_many(Sales, &state.orm).await?;

    let items = registers
        .into_iter()
        .zip(users)
        .zip(sales)
        .map(|((register, user), sales)| CashRegisterWithRelations {
            cash_register: CashRegister::from(register),
            user: user.map(UserSummary::from),
            sales: newest_first(sales),
        })
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Cash registers",
        CashRegisterList { items },
        Some(meta),
    ))
}

pub async fn get_cash_register(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<CashRegisterWithRelations>> {
    let register = CashRegisters::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Cash register"))?;

    let user = register.find_related(Users).one(&state.orm).await?;
    let sales = register
        .find_related(Sales)
        .order_by_desc(SaleCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let data = CashRegisterWithRelations {
        cash_register: CashRegister::from(register),
        user: user.map(UserSummary::from),
        sales: sales.into_iter().map(SaleSummary::from).collect(),
    };
    Ok(ApiResponse::success("Cash register", data, Some(Meta::empty())))
}

pub async fn open_cash_register(
    state: &AppState,
    payload: OpenCashRegisterRequest,
) -> AppResult<ApiResponse<CashRegisterWithUser>> {
    let new_register = payload.validate()?;

    let user = Users::find_by_id(new_register.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    if find_open_for_user(&state.orm, user.id, None).await?.is_some() {
        return Err(AppError::Conflict(ALREADY_OPEN.into()));
    }

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        status: Set(CashRegisterStatus::Open),
        initial_amount: Set(new_register.initial_amount),
        current_amount: Set(new_register.initial_amount),
        final_amount: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    };
    // The partial unique index on open registers catches a concurrent open.
    let register = active
        .insert(&state.orm)
        .await
        .map_err(|err| AppError::from_write(err, ALREADY_OPEN))?;

    audit::record(
        state.pool(),
        Some(user.id),
        "cash_register_open",
        "cash_registers",
        serde_json::json!({
            "cash_register_id": register.id,
            "initial_amount": register.initial_amount,
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Cash register opened",
        CashRegisterWithUser {
            cash_register: CashRegister::from(register),
            user: Some(UserSummary::from(user)),
        },
        Some(Meta::empty()),
    ))
}

pub async fn update_cash_register(
    state: &AppState,
    id: Uuid,
    payload: UpdateCashRegisterRequest,
) -> AppResult<ApiResponse<CashRegisterWithUser>> {
    let changes = payload.validate()?;

    let txn = state.orm.begin().await?;

    let existing = CashRegisters::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound("Cash register"))?;

    let reopening = changes.reopens(existing.status);
    if reopening && find_open_for_user(&txn, existing.user_id, Some(id)).await?.is_some() {
        return Err(AppError::Conflict(ALREADY_OPEN.into()));
    }

    let final_amount = changes.final_amount_for(existing.status, existing.current_amount);

    let mut active: ActiveModel = existing.into();
    if let Some(status) = changes.status {
        active.status = Set(status);
    }
    if let Some(current) = changes.current_amount {
        active.current_amount = Set(current);
    }
    if reopening {
        active.final_amount = Set(None);
    }
    if let Some(amount) = final_amount {
        active.final_amount = Set(Some(amount));
    }
    active.updated_at = Set(Utc::now().into());

    let register = active
        .update(&txn)
        .await
        .map_err(|err| AppError::from_write(err, ALREADY_OPEN))?;
    let user = register.find_related(Users).one(&txn).await?;

    txn.commit().await?;

    audit::record(
        state.pool(),
        Some(register.user_id),
        "cash_register_update",
        "cash_registers",
        serde_json::json!({
            "cash_register_id": register.id,
            "status": register.status,
            "current_amount": register.current_amount,
            "final_amount": register.final_amount,
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        CashRegisterWithUser {
            cash_register: CashRegister::from(register),
            user: user.map(UserSummary::from),
        },
        Some(Meta::empty()),
    ))
}

pub async fn delete_cash_register(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<Deleted>> {
    let register = CashRegisters::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Cash register"))?;

    let sale_count = Sales::find()
        .filter(SaleCol::CashRegisterId.eq(register.id))
        .count(&state.orm)
        .await?;
    if sale_count > 0 {
        return Err(AppError::Conflict(
            "Cannot delete a cash register with associated sales".into(),
        ));
    }

    // A sale inserted after the count still trips the foreign key.
    CashRegisters::delete_by_id(id)
        .exec(&state.orm)
        .await
        .map_err(|err| {
            AppError::from_write(err, "Cannot delete a cash register with associated sales")
        })?;

    audit::record(
        state.pool(),
        Some(register.user_id),
        "cash_register_delete",
        "cash_registers",
        serde_json::json!({ "cash_register_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Cash register deleted",
        Deleted { id },
        Some(Meta::empty()),
    ))
}

async fn find_open_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    except: Option<Uuid>,
) -> Result<Option<Model>, DbErr> {
    let mut condition = Condition::all()
        .add(Column::UserId.eq(user_id))
        .add(Column::Status.eq(CashRegisterStatus::Open));
    if let Some(id) = except {
        condition = condition.add(Column::Id.ne(id));
    }
    CashRegisters::find().filter(condition).one(conn).await
}

fn newest_first(mut sales: Vec<SaleModel>) -> Vec<SaleSummary> {
    sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sales.into_iter().map(SaleSummary::from).collect()
}
