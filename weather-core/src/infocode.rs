//! Upstream `infocode` values and their messages.

use regex::Regex;
use std::{collections::HashMap, sync::LazyLock};

pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";
pub const ENGINE_RESPONSE_DATA_ERROR: &str = "ENGINE_RESPONSE_DATA_ERROR 服务响应失败";

const ERROR_CODES: &[(&str, &str)] = &[
    ("10001", "INVALID_USER_KEY key不正确或过期"),
    ("10002", "SERVICE_NOT_AVAILABLE 没有权限使用相应的服务或者请求接口的路径拼写错误"),
    ("10003", "DAILY_QUERY_OVER_LIMIT 访问已超出日访问量"),
    ("10004", "ACCESS_TOO_FREQUENT 单位时间内访问过于频繁"),
    ("10005", "INVALID_USER_IP IP白名单出错，发送请求的服务器IP不在IP白名单内"),
    ("10006", "INVALID_USER_DOMAIN 绑定域名无效"),
    ("10007", "INVALID_USER_SIGNATURE 数字签名未通过验证"),
    ("10008", "INVALID_USER_SCODE MD5安全码未通过验证"),
    ("10009", "USERKEY_PLAT_NOMATCH 请求key与绑定平台不符"),
    ("10010", "IP_QUERY_OVER_LIMIT IP访问超限"),
    ("10011", "NOT_SUPPORT_HTTPS 服务不支持https请求"),
    ("10012", "INSUFFICIENT_PRIVILEGES 权限不足，服务请求被拒绝"),
    ("10013", "USER_KEY_RECYCLED Key被删除"),
    ("10014", "QPS_HAS_EXCEEDED_THE_LIMIT 云图服务QPS超限"),
    ("10015", "GATEWAY_TIMEOUT 受单机QPS限流限制"),
    ("10016", "SERVER_IS_BUSY 服务器负载过高"),
    ("10017", "RESOURCE_UNAVAILABLE 所请求的资源不可用"),
    ("10019", "CQPS_HAS_EXCEEDED_THE_LIMIT 使用的某个服务总QPS超限"),
    ("10020", "CKQPS_HAS_EXCEEDED_THE_LIMIT 某个Key使用某个服务接口QPS超出限制"),
    ("10021", "CUQPS_HAS_EXCEEDED_THE_LIMIT  账号使用某个服务接口QPS超出限制"),
    ("10026", "INVALID_REQUEST 账号处于被封禁状态"),
    ("10029", "ABROAD_DAILY_QUERY_OVER_LIMIT 某个Key的QPS超出限制"),
    ("10041", "NO_EFFECTIVE_INTERFACE 请求的接口权限过期"),
    ("10044", "USER_DAILY_QUERY_OVER_LIMIT 账号维度日调用量超出限制"),
    ("10045", "USER_ABROAD_DAILY_QUERY_OVER_LIMIT 账号维度海外服务日调用量超出限制"),
    ("20000", "INVALID_PARAMS 请求参数非法"),
    ("20001", "MISSING_REQUIRED_PARAMS 缺少必填参数"),
    ("20002", "ILLEGAL_REQUEST 请求协议非法"),
    ("20003", "UNKNOWN_ERROR 其他未知错误"),
    (
        "20011",
        "INSUFFICIENT_ABROAD_PRIVILEGES 查询坐标或规划点（包括起点、终点、途经点）在海外，但没有海外地图权限",
    ),
    ("20012", "ILLEGAL_CONTENT 查询信息存在非法内容"),
    ("20800", "OUT_OF_SERVICE 规划点（包括起点、终点、途经点）不在中国陆地范围内"),
    ("20801", "NO_ROADS_NEARBY 划点（起点、终点、途经点）附近搜不到路"),
    ("20802", "ROUTE_FAIL 路线计算失败，通常是由于道路连通关系导致"),
    ("20803", "OVER_DIRECTION_RANGE 起点终点距离过长。"),
    ("40000", "QUOTA_PLAN_RUN_OUT 余额耗尽"),
    ("40001", "GEOFENCE_MAX_COUNT_REACHED 围栏个数达到上限"),
    ("40002", "SERVICE_EXPIRED 购买服务到期"),
    ("40003", "ABROAD_QUOTA_PLAN_RUN_OUT 海外服务余额耗尽"),
];

static TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ERROR_CODES.iter().copied().collect());

static ENGINE_ERROR_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^300[0-9]{2}$").expect("engine error pattern is valid"));

/// Table entry for `code`, if the code is a documented one.
pub fn lookup(code: &str) -> Option<&'static str> {
    TABLE.get(code).copied()
}

/// Message reported for a failed response carrying `code`.
///
/// `300xx` codes are engine failures regardless of the table; anything else
/// not in the table is `UNKNOWN_ERROR`.
pub fn describe(code: Option<&str>) -> &'static str {
    let Some(code) = code else {
        return UNKNOWN_ERROR;
    };

    if ENGINE_ERROR_CODE.is_match(code) {
        return ENGINE_RESPONSE_DATA_ERROR;
    }

    lookup(code).unwrap_or(UNKNOWN_ERROR)
}
