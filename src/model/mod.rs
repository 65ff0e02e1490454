pub mod employee;
pub mod leave;
pub mod payroll;
pub mod payslip;
pub mod role;
pub mod user;
