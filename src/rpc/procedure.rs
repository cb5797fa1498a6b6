//! Remote procedure names and call descriptions

use std::fmt;

use serde_json::{Map, Value};

/// A server procedure: the model it lives on and its method name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Procedure {
    pub model: &'static str,
    pub method: &'static str,
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.method)
    }
}

/// Outstanding customer invoices
pub const GET_INVOICES: Procedure = Procedure {
    model: "account.move",
    method: "get_invoices",
};

/// Post a draft invoice
pub const POST_INVOICE: Procedure = Procedure {
    model: "account.move",
    method: "post_invoice",
};

/// Register a payment from the point of sale
pub const POS_REGISTER_PAYMENT: Procedure = Procedure {
    model: "account.move",
    method: "pos_register_payment",
};

/// Bank and cash journals
pub const GET_JOURNAL: Procedure = Procedure {
    model: "account.journal",
    method: "get_journal",
};

/// Closing data of a POS session
pub const GET_CLOSING_CONTROL_DATA: Procedure = Procedure {
    model: "pos.session",
    method: "get_closing_control_data",
};

/// Sale details report of sessions or of configurations over a period
pub const GET_SALE_DETAILS: Procedure = Procedure {
    model: "report.point_of_sale.report_saledetails",
    method: "get_sale_details",
};

/// One invocation: procedure, positional arguments and call context
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    pub procedure: Procedure,
    pub args: Vec<Value>,
    pub context: Map<String, Value>,
}

impl ProcedureCall {
    pub fn new(procedure: Procedure) -> Self {
        Self {
            procedure,
            args: Vec::new(),
            context: Map::new(),
        }
    }

    /// Set the positional arguments
    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    /// Add a key to the call context
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}
