use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{ContractType, Employee, EmployeeContract, PayrollRecord};

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeInput {
    pub name: String,
    pub email: String,
    pub max_hours_per_week: Option<f64>,
    pub max_consecutive_days: Option<i64>,
    pub min_rest_hours_between_shifts: Option<f64>,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_employee(&self, input: EmployeeInput) -> Result<Employee> {
        let now = Utc::now().naive_utc();
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (
                id, name, email, is_active, max_hours_per_week,
                max_consecutive_days, min_rest_hours_between_shifts, created_at, updated_at
            )
            VALUES (?, ?, ?, TRUE, ?, ?, ?, ?, ?)
            RETURNING id, name, email, is_active, max_hours_per_week,
                      max_consecutive_days, min_rest_hours_between_shifts, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.max_hours_per_week)
        .bind(input.max_consecutive_days)
        .bind(input.min_rest_hours_between_shifts)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn get_active_employees(&self) -> Result<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, email, is_active, max_hours_per_week,
                   max_consecutive_days, min_rest_hours_between_shifts, created_at, updated_at
            FROM employees WHERE is_active = TRUE
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    pub async fn create_contract(
        &self,
        employee_id: Uuid,
        contract_type: ContractType,
    ) -> Result<EmployeeContract> {
        let now = Utc::now().naive_utc();
        let contract = sqlx::query_as::<_, EmployeeContract>(
            r#"
            INSERT INTO employee_contracts (id, employee_id, contract_type, is_active, created_at, updated_at)
            VALUES (?, ?, ?, TRUE, ?, ?)
            RETURNING id, employee_id, contract_type, is_active, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(employee_id)
        .bind(contract_type)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(contract)
    }

    /// Active contract per employee. An employee without one falls back to
    /// part-time at the scheduling layer.
    pub async fn get_active_contracts(&self) -> Result<HashMap<Uuid, ContractType>> {
        let contracts = sqlx::query_as::<_, EmployeeContract>(
            r#"
            SELECT id, employee_id, contract_type, is_active, created_at, updated_at
            FROM employee_contracts WHERE is_active = TRUE
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(contracts
            .into_iter()
            .map(|c| (c.employee_id, c.contract_type))
            .collect())
    }

    pub async fn create_payroll_record(
        &self,
        employee_id: Uuid,
        period_month: &str,
        total_work_hours: f64,
    ) -> Result<PayrollRecord> {
        let record = sqlx::query_as::<_, PayrollRecord>(
            r#"
            INSERT INTO payroll_records (id, employee_id, period_month, total_work_hours, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, employee_id, period_month, total_work_hours, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(employee_id)
        .bind(period_month)
        .bind(total_work_hours)
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Worked hours per employee for one payroll month (`YYYY-MM`).
    /// Employees without a record simply have no entry.
    pub async fn get_worked_hours_for_month(
        &self,
        period_month: &str,
    ) -> Result<HashMap<Uuid, f64>> {
        let records = sqlx::query_as::<_, PayrollRecord>(
            r#"
            SELECT id, employee_id, period_month, total_work_hours, created_at
            FROM payroll_records WHERE period_month = ?
            "#,
        )
        .bind(period_month)
        .fetch_all(&self.pool)
        .await?;

        Ok(records
            .into_iter()
            .map(|r| (r.employee_id, r.total_work_hours))
            .collect())
    }
}
