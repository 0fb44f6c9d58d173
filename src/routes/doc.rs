use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cash_registers::{
            CashRegisterList, CashRegisterWithRelations, CashRegisterWithUser,
            OpenCashRegisterRequest, UpdateCashRegisterRequest,
        },
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        sales::{CreateSaleRequest, SaleList, SaleWithRelations, UpdateSaleRequest},
        users::{CreateUserRequest, UpdateUserRequest, UserList},
    },
    entity::{
        cash_registers::CashRegisterStatus,
        sales::{PaymentMethod, SaleItem, SaleStatus},
        users::UserRole,
    },
    models::{
        CashRegister, CashRegisterSummary, Product, Sale, SaleSummary, User, UserSummary,
    },
    response::{ApiResponse, Deleted, Meta},
    routes::{cash_registers, health, products, sales, users},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::readiness_check,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        cash_registers::list_cash_registers,
        cash_registers::get_cash_register,
        cash_registers::open_cash_register,
        cash_registers::update_cash_register,
        cash_registers::delete_cash_register,
        sales::list_sales,
        sales::get_sale,
        sales::create_sale,
        sales::update_sale,
        sales::delete_sale
    ),
    components(
        schemas(
            User,
            UserSummary,
            UserRole,
            Product,
            CashRegister,
            CashRegisterSummary,
            CashRegisterStatus,
            Sale,
            SaleSummary,
            SaleItem,
            SaleStatus,
            PaymentMethod,
            CreateUserRequest,
            UpdateUserRequest,
            UserList,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            OpenCashRegisterRequest,
            UpdateCashRegisterRequest,
            CashRegisterList,
            CashRegisterWithRelations,
            CashRegisterWithUser,
            CreateSaleRequest,
            UpdateSaleRequest,
            SaleList,
            SaleWithRelations,
            Deleted,
            Meta,
            ApiResponse<User>,
            ApiResponse<Product>,
            ApiResponse<SaleWithRelations>,
            ApiResponse<SaleList>,
            ApiResponse<CashRegisterWithRelations>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "User account endpoints"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Cash registers", description = "Cash register lifecycle endpoints"),
        (name = "Sales", description = "Sale endpoints; completed sales credit their register"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
