use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        companies::{CompanyDetail, CompanyList, CreateCompanyRequest, UpdateCompanyRequest},
        customer_pricing::{
            CreateCustomerPriceRequest, CreateCustomerTierRequest, CustomerPriceList,
            CustomerTierList, UpdateCustomerPriceRequest,
        },
        customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
        orders::{CreateOrderRequest, OrderItemInput, OrderList, OrderTotal, UpdateOrderRequest},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
    },
    models::{Company, Customer, CustomerSpecificPrice, CustomerTier, Order, OrderItem, Product},
    response::{ApiResponse, Meta},
    routes::{
        companies, customer_pricing, customers, health, orders, params, products as product_routes,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        companies::list_companies,
        companies::create_company,
        companies::get_company,
        companies::update_company,
        companies::delete_company,
        companies::list_company_customers,
        customers::list_customers,
        customers::create_customer,
        customers::get_customer,
        customers::update_customer,
        customers::delete_customer,
        customers::duplicate_customer,
        customers::list_customer_orders,
        product_routes::list_products,
        product_routes::create_product,
        product_routes::get_product,
        product_routes::get_product_by_sku,
        product_routes::update_product,
        product_routes::delete_product,
        product_routes::duplicate_product,
        customer_pricing::list_customer_tiers,
        customer_pricing::create_customer_tier,
        customer_pricing::get_customer_tier,
        customer_pricing::delete_customer_tier,
        customer_pricing::list_customer_prices,
        customer_pricing::create_customer_price,
        customer_pricing::get_customer_price,
        customer_pricing::update_customer_price,
        customer_pricing::delete_customer_price,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::update_order,
        orders::delete_order,
        orders::duplicate_order,
        orders::get_order_total
    ),
    components(
        schemas(
            Company,
            Customer,
            CustomerTier,
            CustomerSpecificPrice,
            Product,
            Order,
            OrderItem,
            CompanyDetail,
            CompanyList,
            CreateCompanyRequest,
            UpdateCompanyRequest,
            CustomerList,
            CreateCustomerRequest,
            UpdateCustomerRequest,
            CustomerTierList,
            CreateCustomerTierRequest,
            CustomerPriceList,
            CreateCustomerPriceRequest,
            UpdateCustomerPriceRequest,
            ProductList,
            CreateProductRequest,
            UpdateProductRequest,
            OrderItemInput,
            CreateOrderRequest,
            UpdateOrderRequest,
            OrderList,
            OrderTotal,
            params::Pagination,
            params::SortOrder,
            params::ProductSortBy,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<OrderTotal>,
            ApiResponse<Product>,
            ApiResponse<ProductList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Companies", description = "Company endpoints"),
        (name = "Customers", description = "Customer endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Customer pricing", description = "Customer tiers and customer specific prices"),
        (name = "Orders", description = "Order endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
