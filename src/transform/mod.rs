pub mod literal;
pub mod salary;

pub use salary::{
    SalaryPeriod, annualize_salary_range, extract_field, normalize_salary, prepare_salaries,
};
