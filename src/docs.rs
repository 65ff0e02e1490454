use crate::api::dashboard::{DashboardResponse, MonthlyHires, TopEarner};
use crate::api::employee::{CreateEmployee, CreatedEmployeeResponse, EmployeeResponse};
use crate::api::payroll::PayrollEntry;
use crate::error::ErrorBody;
use crate::models::{LoginReqDto, LoginResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payroll Management API",
        version = "1.0.0",
        description = r#"
## Payroll Management System

Backend for the payroll administration dashboard and the employee view.

### Key Features
- **Login** with role-based dashboard routing
- **Dashboard** headcount, salary, payroll, leave and bonus aggregates
- **Employees** list, create, and delete (payroll records go with them)
- **Payroll** joined payroll report with payslip download links
- **Payslips** PDF download

### Security
`/api/login` returns a JWT access token. Other routes accept
`Authorization: Bearer <token>` and require it when the server runs with
`REQUIRE_AUTH=true`.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::login,

        crate::api::dashboard::dashboard,

        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::delete_employee,

        crate::api::payroll::list_payrolls,
        crate::api::payslip::download_payslip
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            DashboardResponse,
            MonthlyHires,
            TopEarner,
            CreateEmployee,
            EmployeeResponse,
            CreatedEmployeeResponse,
            PayrollEntry,
            ErrorBody
        )
    ),
    tags(
        (name = "Auth", description = "Login"),
        (name = "Dashboard", description = "Admin dashboard aggregates"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Payroll", description = "Payroll report and payslip APIs"),
    )
)]
pub struct ApiDoc;
