//! Query plan compiler
//!
//! Compile flow (strict order):
//! 1. Derive the valid field set for the model
//! 2. Build the query plan (page bounds, filters, sorts)
//! 3. Count rows through the executor
//! 4. Derive total pages
//! 5. Run the narrowed data query
//! 6. Assemble the page result

use super::config::{CompileConfig, CountPolicy};
use super::errors::CompileResult;
use super::result::PageResult;
use crate::executor::{DataQuery, ExecutorError, QueryExecutor};
use crate::observability::{log_event_with_fields, Event};
use crate::query::{Diagnostics, FilterPredicate, QueryPlan, RawParams};
use crate::schema::{valid_fields, SchemaResult, SchemaSource};

/// Compiles request parameters into a plan and drives an executor.
///
/// Holds no per-request state; one compiler can serve concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    config: CompileConfig,
}

impl Compiler {
    pub fn new(config: CompileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> CompileConfig {
        self.config
    }

    /// Builds the plan for `model` without touching the executor.
    pub fn plan<S>(
        &self,
        model: &str,
        params: &RawParams,
        schema: &S,
    ) -> SchemaResult<(QueryPlan, Diagnostics)>
    where
        S: SchemaSource + ?Sized,
    {
        let fields = valid_fields(schema, model)?;
        let (plan, diagnostics) = QueryPlan::build_with_diagnostics(params, &fields);

        for dropped in diagnostics.dropped() {
            log_event_with_fields(
                Event::ParamDropped,
                &[
                    ("model", model),
                    ("key", &dropped.key),
                    ("reason", &dropped.reason.to_string()),
                ],
            );
        }

        log_event_with_fields(
            Event::PlanCompiled,
            &[
                ("model", model),
                ("page", &plan.page_spec().page().to_string()),
                ("size", &plan.page_spec().size().to_string()),
                ("filters", &plan.filters().len().to_string()),
                ("sorts", &plan.sorts().len().to_string()),
                ("dropped", &diagnostics.dropped().len().to_string()),
            ],
        );

        Ok((plan, diagnostics))
    }

    /// Compiles `params` for `model` and fetches one page through `executor`.
    pub fn compile<S, E>(
        &self,
        model: &str,
        params: &RawParams,
        schema: &S,
        executor: &E,
    ) -> CompileResult<PageResult<E::Record>>
    where
        S: SchemaSource + ?Sized,
        E: QueryExecutor + ?Sized,
    {
        let (plan, diagnostics) = self.plan(model, params, schema)?;

        let count_filters: &[FilterPredicate] = match self.config.count_policy {
            CountPolicy::Unfiltered => &[],
            CountPolicy::Filtered => plan.filters(),
        };

        let total = executor
            .count(model, count_filters)
            .map_err(|err| executor_failed(model, "count", err))?;

        log_event_with_fields(
            Event::CountExecuted,
            &[("model", model), ("total", &total.to_string())],
        );

        let query = DataQuery::from_plan(model, &plan);
        let items = executor
            .query(&query)
            .map_err(|err| executor_failed(model, "query", err))?;

        log_event_with_fields(
            Event::QueryExecuted,
            &[
                ("model", model),
                ("offset", &query.offset.to_string()),
                ("limit", &query.limit.to_string()),
                ("rows", &items.len().to_string()),
            ],
        );

        let result = PageResult::new(items, total, plan.page_spec());
        if self.config.report_dropped {
            Ok(result.with_dropped(diagnostics))
        } else {
            Ok(result)
        }
    }
}

/// Logs an executor failure and hands it back unchanged.
fn executor_failed(model: &str, stage: &str, err: ExecutorError) -> ExecutorError {
    log_event_with_fields(
        Event::ExecutorFailed,
        &[
            ("model", model),
            ("stage", stage),
            ("code", err.code()),
            ("error", &err.to_string()),
        ],
    );
    err
}

/// Compiles with the default configuration.
pub fn compile<S, E>(
    model: &str,
    params: &RawParams,
    schema: &S,
    executor: &E,
) -> CompileResult<PageResult<E::Record>>
where
    S: SchemaSource + ?Sized,
    E: QueryExecutor + ?Sized,
{
    Compiler::default().compile(model, params, schema, executor)
}
