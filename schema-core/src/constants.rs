/// 提示词模板相关常量
pub mod prompt {
    /// 业务需求占位符
    pub const REQUIREMENT_PLACEHOLDER: &str = "[BUSINESS REQUIREMENT]";

    /// 表结构占位符
    pub const TABLE_STRUCTURE_PLACEHOLDER: &str = "[TABLE STRUCTURE]";

    /// `init` 生成的示例模板
    pub const SAMPLE_TEMPLATE: &str = "You are an expert SQL developer.

Business requirement:
[BUSINESS REQUIREMENT]

The database contains the following tables:
[TABLE STRUCTURE]

Write a single SQL query that satisfies the requirement above.
";

    /// `init` 生成的示例业务需求
    pub const SAMPLE_REQUIREMENT: &str =
        "List the ten customers with the highest total invoice amount in the last calendar year.\n";
}

/// 文件路径相关常量
pub mod files {
    /// 默认配置文件名
    pub const CONFIG_FILE_NAME: &str = "schema-prompt.toml";

    /// 默认业务需求文件
    pub const DEFAULT_REQUIREMENT_FILE: &str = "BusinessRequirement.txt";

    /// 默认提示词模板文件
    pub const DEFAULT_TEMPLATE_FILE: &str = "Prompt template.txt";

    /// 默认输出文件
    pub const DEFAULT_OUTPUT_FILE: &str = "op.txt";
}

/// 数据库相关常量
pub mod database {
    /// 默认服务器 (本机默认实例)
    pub const DEFAULT_SERVER: &str = ".";

    /// 默认数据库
    pub const DEFAULT_DATABASE: &str = "WideWorldImporters";

    /// 默认 ODBC 驱动名称
    pub const DEFAULT_DRIVER: &str = "{ODBC Driver 17 for SQL Server}";

    /// SQL Server 默认端口
    pub const DEFAULT_PORT: u16 = 1433;

    /// 需要拼接长度的字符类型
    pub const CHARACTER_TYPES: &[&str] = &["varchar", "nvarchar", "char", "nchar"];

    /// SQL Server 用 -1 表示 MAX 长度
    pub const MAX_LENGTH_MARKER: i64 = -1;

    /// 默认导出的表，顺序即输出顺序
    pub const DEFAULT_TABLES: &[&str] = &[
        "Application.People",
        "Application.Countries",
        "Application.DeliveryMethods",
        "Application.PaymentMethods",
        "Application.TransactionTypes",
        "Purchasing.SupplierCategories",
        "Sales.BuyingGroups",
        "Sales.CustomerCategories",
        "Warehouse.Colors",
        "Warehouse.PackageTypes",
        "Application.StateProvinces",
        "Application.Cities",
        "Purchasing.Suppliers",
        "Sales.Customers",
        "Purchasing.PurchaseOrders",
        "Sales.Orders",
        "Warehouse.StockItems",
        "Sales.Invoices",
        "Sales.OrderLines",
        "Warehouse.StockItemHoldings",
        "Sales.CustomerTransactions",
        "Sales.InvoiceLines",
        "Warehouse.StockItemTransactions",
    ];
}

/// 日志相关常量
pub mod logging {
    /// 设置后日志输出到该文件
    pub const LOG_FILE_ENV: &str = "SCHEMA_PROMPT_LOG_FILE";
}
