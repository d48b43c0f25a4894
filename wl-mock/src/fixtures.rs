use serde_json::{Value, json};

pub fn all() -> Vec<(&'static str, Value)> {
    vec![
        ("AAPL", aapl()),
        ("MSFT", msft()),
        ("7203.T", toyota()),
        ("NOPRICE", json!({ "assetProfile": { "sector": "Unknown" } })),
    ]
}

fn aapl() -> Value {
    json!({
        "price": {
            "regularMarketPrice": { "raw": 189.84, "fmt": "189.84" },
            "regularMarketChangePercent": { "raw": 1.2345, "fmt": "1.23%" },
            "shortName": "Apple Inc.",
            "longName": "Apple Inc.",
            "exchangeName": "NasdaqGS"
        },
        "assetProfile": {
            "sector": "Technology",
            "industry": "Consumer Electronics",
            "fullTimeEmployees": 161000,
            "address1": "One Apple Park Way",
            "city": "Cupertino",
            "zip": "95014",
            "country": "United States",
            "phone": "(408) 996-1010",
            "website": "https://www.apple.com",
            "irWebsite": "http://investor.apple.com/",
            "longBusinessSummary": "Apple Inc. designs, manufactures, and markets smartphones.",
            "companyOfficers": [
                { "name": "Mr. Timothy D. Cook", "title": "CEO & Director", "age": 62 },
                { "name": "Mr. Kevan  Parekh", "title": "Senior VP & CFO", "age": 52 },
                { "name": "Ms. Katherine L. Adams", "title": "Senior VP & General Counsel", "age": null }
            ]
        },
        "financialData": {
            "currentRatio": { "raw": 0.867, "fmt": "0.87" },
            "returnOnEquity": { "raw": 1.4725, "fmt": "147.25%" },
            "profitMargins": { "raw": 0.2397, "fmt": "23.97%" },
            "totalCash": { "raw": 67150000000i64, "fmt": "67.15B" },
            "recommendationKey": "buy",
            "numberOfAnalystOpinions": { "raw": 38, "fmt": "38" }
        },
        "summaryDetail": {
            "marketCap": { "raw": 2950000000000i64, "fmt": "2.95T" },
            "beta": { "raw": 1.24, "fmt": "1.24" },
            "trailingPE": { "raw": 29.5, "fmt": "29.50" },
            "dividendYield": { "raw": 0.0051, "fmt": "0.51%" },
            "volume": { "raw": 48000000, "fmt": "48M" },
            "currency": "USD"
        }
    })
}

fn msft() -> Value {
    json!({
        "price": {
            "regularMarketPrice": { "raw": 411.22 },
            "regularMarketChangePercent": { "raw": -0.5 },
            "longName": "Microsoft Corporation",
            "exchangeName": "NasdaqGS"
        },
        "assetProfile": {
            "sector": "Technology",
            "industry": "Software - Infrastructure",
            "fullTimeEmployees": 221000,
            "city": "Redmond",
            "country": "United States",
            "website": "https://www.microsoft.com",
            "companyOfficers": [
                { "name": "Mr. Satya  Nadella", "title": "Chairman & CEO", "age": 56 },
                { "name": "Mr. Bradford L. Smith", "title": "Vice Chair & President", "age": 64 }
            ]
        },
        "financialData": {
            "currentRatio": { "raw": 1.27, "fmt": "1.27" },
            "recommendationKey": "strong_buy"
        },
        "summaryDetail": {
            "marketCap": { "raw": 3060000000000i64, "fmt": "3.06T" },
            "beta": { "raw": 0.9 },
            "currency": "USD"
        }
    })
}

fn toyota() -> Value {
    json!({
        "price": {
            "regularMarketPrice": { "raw": 2850.5, "fmt": "2,850.50" },
            "regularMarketChangePercent": { "raw": 0.0, "fmt": "0.00%" },
            "shortName": "TOYOTA MOTOR CORP",
            "exchangeName": "Tokyo"
        },
        "assetProfile": {
            "sector": "Consumer Cyclical",
            "industry": "Auto Manufacturers",
            "fullTimeEmployees": 0,
            "city": "Tokyo",
            "country": "Japan",
            "phone": "03-1234",
            "website": "https://www.example.com",
            "companyOfficers": [
                { "name": "Mr. Koji  Sato", "title": "Representative Director", "age": 54 },
                { "name": "Mr. Akio Toyoda", "title": "Chairman of the Board" }
            ]
        },
        "summaryDetail": {
            "marketCap": { "raw": 45000000000000i64, "fmt": "45T" },
            "currency": "JPY"
        }
    })
}
